/// Benchmark for plan flattening and candidate selection marking
///
/// Builds a wide, deep synthetic plan and measures how fast it can be
/// flattened, rebuilt and used to mark selected physical candidates.

use opttrace::{CandidatePlanTrace, PhysicalOptimizeTracer, PlanId, PlanTrace};
use std::time::Instant;

/// Balanced tree with `fanout` children per node down to `depth`
fn build_plan(next_id: &mut PlanId, depth: usize, fanout: usize) -> PlanTrace {
    let id = *next_id;
    *next_id += 1;
    let mut node = PlanTrace::new(id, if depth == 0 { "TableScan" } else { "HashJoin" })
        .with_cost(id as f64);
    if depth > 0 {
        for _ in 0..fanout {
            node.children.push(build_plan(next_id, depth - 1, fanout));
        }
    }
    node
}

fn main() {
    println!("=== Plan Flatten Benchmark ===\n");

    let mut next_id = 0;
    let plan = build_plan(&mut next_id, 8, 3);
    let node_count = plan.node_count();
    println!("Plan nodes: {}\n", node_count);

    // Benchmark: flattening
    println!("📊 Flatten:");
    let iterations = 200;
    let start = Instant::now();
    let mut total = 0;
    for _ in 0..iterations {
        total += plan.flatten().len();
    }
    let duration = start.elapsed();
    println!("  Flattened {} nodes", total);
    println!("  Time: {:?}", duration);
    println!(
        "  Throughput: {:.0} nodes/sec",
        total as f64 / duration.as_secs_f64()
    );
    println!();

    // Benchmark: rebuild
    println!("📊 Rebuild:");
    let flat = plan.flatten();
    let start = Instant::now();
    for _ in 0..iterations {
        let rebuilt = flat.rebuild().expect("Failed to rebuild plan");
        assert_eq!(rebuilt.node_count(), node_count);
    }
    let duration = start.elapsed();
    println!("  Time: {:?}", duration);
    println!(
        "  Throughput: {:.0} plans/sec",
        iterations as f64 / duration.as_secs_f64()
    );
    println!();

    // Benchmark: candidate marking, half of the candidates are in the final plan
    println!("📊 Candidate selection:");
    let mut tracer = PhysicalOptimizeTracer::new();
    for id in 0..(next_id * 2) {
        tracer.append_candidate(CandidatePlanTrace::new(
            PlanTrace::new(id, "Candidate"),
            format!("Logical_{}", id),
        ));
    }
    let start = Instant::now();
    tracer.record_final_plan_trace(&plan);
    let duration = start.elapsed();
    println!(
        "  Marked {} of {} candidates",
        tracer.selected_candidates().count(),
        tracer.candidates.len()
    );
    println!("  Time: {:?}", duration);
}
