use branchwork::prelude::*;
use clap::Parser;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// A CLI tool to generate random workflows by replaying random edits
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: PathBuf,

    /// Number of random edits to attempt
    #[arg(short, long, default_value_t = 40)]
    edits: usize,

    /// Seed for the random number generator; a random seed is used if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Share of edits that are deletions, in percent
    #[arg(long, default_value_t = 15)]
    delete_percent: u32,

    /// Remove detached subtrees after every edit
    #[arg(long)]
    sweep: bool,
}

const ACTION_LABELS: &[&str] = &[
    "Send email",
    "Charge card",
    "Reserve stock",
    "Notify team",
    "Create invoice",
    "Wait 1 day",
];

const CONDITION_LABELS: &[&str] = &[
    "Paid?",
    "In stock?",
    "VIP customer?",
    "Opened email?",
];

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if cli.delete_percent > 100 {
        eprintln!(
            "Error: --delete-percent ({}) cannot be greater than 100",
            cli.delete_percent
        );
        std::process::exit(1);
    }

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    println!(
        "Generating workflow from {} random edits (seed {})...",
        cli.edits, seed
    );

    let policy = if cli.sweep {
        OrphanPolicy::Sweep
    } else {
        OrphanPolicy::Retain
    };
    let mut workflow = Workflow::builder()
        .with_id_source(SequentialIds::new("node"))
        .with_orphan_policy(policy)
        .build();

    let mut applied = 0usize;
    let mut rejected = 0usize;
    for _ in 0..cli.edits {
        match random_edit(&mut rng, &mut workflow, cli.delete_percent) {
            Ok(()) => applied += 1,
            Err(_) => rejected += 1,
        }
    }

    let snapshot = workflow.export_snapshot();
    export::write_to_path(&cli.output, &snapshot)?;

    println!("-> Applied {} edit(s), {} rejected.", applied, rejected);
    println!(
        "-> {} node(s), {} detached.",
        snapshot.len(),
        snapshot.orphans().len()
    );
    println!(
        "Successfully generated and saved workflow to '{}'",
        cli.output.display()
    );

    Ok(())
}

/// Picks a random node that is reachable from the root.
fn pick_node(rng: &mut StdRng, snapshot: &WorkflowSnapshot) -> NodeId {
    let candidates = snapshot.reachable().into_iter().sorted().collect_vec();
    candidates[rng.random_range(0..candidates.len())].clone()
}

/// Attempts one random insert, delete, or relabel.
fn random_edit(
    rng: &mut StdRng,
    workflow: &mut Workflow,
    delete_percent: u32,
) -> std::result::Result<(), EditError> {
    let target = pick_node(rng, workflow.snapshot());

    if rng.random_range(0..100) < delete_percent {
        return workflow.delete_node(&target).map(|_| ());
    }

    let kind = match rng.random_range(0..10) {
        0..=5 => NodeKind::Action,
        6..=8 => NodeKind::Branch,
        _ => NodeKind::End,
    };
    let slot = rng.random_range(0..2);
    let report = workflow.insert_node_at(&target, kind, slot)?;

    let labels = match kind {
        NodeKind::Action => ACTION_LABELS,
        NodeKind::Branch => CONDITION_LABELS,
        _ => return Ok(()),
    };
    let label = labels[rng.random_range(0..labels.len())];
    workflow.relabel_node(&report.node_id, label)
}
