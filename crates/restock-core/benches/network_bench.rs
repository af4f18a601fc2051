//! Criterion benchmarks for the Restock core.
//!
//! Two benchmark groups:
//! - `probe_large_pool`: simulated extraction against a pool with 10k item
//!   types -- the hot path of every requester reconciliation.
//! - `step_busy_network`: one tick of a network with 500 nodes and 200
//!   in-flight crafting tasks.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use restock_core::crafting::CraftingPattern;
use restock_core::id::ItemTypeId;
use restock_core::module::NodeModule;
use restock_core::network::Network;
use restock_core::resource::ItemStack;
use restock_core::storage::Action;
use std::hint::black_box;

/// Build a network with `nodes` attached nodes and `tasks` live tasks.
fn build_busy_network(nodes: usize, tasks: usize) -> Network {
    let mut network = Network::new(u32::MAX);
    let iron = ItemTypeId(0);
    network
        .crafting
        .register_item_pattern(iron, CraftingPattern { duration: 1_000 });

    let mut ids = Vec::with_capacity(nodes);
    for _ in 0..nodes {
        ids.push(network.add_node(10));
    }
    for i in 0..tasks {
        let requester = ids[i % ids.len()];
        let _ = network
            .crafting
            .request(requester, ItemStack::new(iron, 32).into(), 0);
    }
    network
}

fn bench_probe_large_pool(c: &mut Criterion) {
    let mut network = Network::new(u32::MAX);
    for i in 0..10_000u32 {
        network.storage.insert_item(ItemTypeId(i), 100);
    }

    c.bench_function("probe_large_pool", |b| {
        b.iter(|| {
            let probed =
                network
                    .storage
                    .extract_item(black_box(ItemTypeId(7_777)), 64, Action::Simulate);
            black_box(probed)
        })
    });
}

fn bench_step_busy_network(c: &mut Criterion) {
    c.bench_function("step_busy_network", |b| {
        b.iter_batched(
            || build_busy_network(500, 200),
            |mut network| {
                let mut modules: Vec<Box<dyn NodeModule>> = Vec::new();
                network.step(&mut modules);
                network
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_probe_large_pool, bench_step_busy_network);
criterion_main!(benches);
