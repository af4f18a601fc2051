//! Headless integration tests driving a full network with the requester
//! module: stock convergence, power outages, filter changes mid-flight,
//! and the item/fluid request split.

use restock_core::config::SimConfig;
use restock_core::id::NodeId;
use restock_core::module::NodeModule;
use restock_core::network::{Network, NetworkEvent};
use restock_core::test_utils::{instant_pattern, iron, slow_pattern, step_n, water};
use restock_requester::{FilterMode, RequesterModule};

// ===========================================================================
// Fixture helpers
// ===========================================================================

/// A network with one iron requester targeting `target`, and the module
/// boxed for `Network::step`.
fn iron_requester_network(
    capacity: u32,
    target: u32,
) -> (Network, NodeId, Vec<Box<dyn NodeModule>>) {
    let mut network = Network::new(capacity);
    network
        .crafting
        .register_item_pattern(iron(), instant_pattern());

    let config = SimConfig::default();
    let node = network.add_node(config.requester_energy_usage);

    let mut module = RequesterModule::new(config);
    module.attach(node);
    module.set_item_filter(node, Some(iron()));
    module.set_amount(node, target);

    (network, node, vec![Box::new(module)])
}

fn requester_module(modules: &[Box<dyn NodeModule>]) -> &RequesterModule {
    modules[0].as_any().downcast_ref().unwrap()
}

fn requester_module_mut(modules: &mut [Box<dyn NodeModule>]) -> &mut RequesterModule {
    modules[0].as_any_mut().downcast_mut().unwrap()
}

// ===========================================================================
// Stock convergence
// ===========================================================================

#[test]
fn large_target_converges_in_capped_steps() {
    // Target 100 with a max craft of 32: four requests (32+32+32+4).
    let (mut network, node, mut modules) = iron_requester_network(100, 100);

    step_n(&mut network, &mut modules, 45);

    assert_eq!(network.storage.item_count(iron()), 100);
    assert!(!requester_module(&modules).is_missing_items(node));
    assert_eq!(network.crafting.task_count(), 0);
}

#[test]
fn external_consumption_triggers_a_fresh_deficit() {
    let (mut network, node, mut modules) = iron_requester_network(100, 64);

    step_n(&mut network, &mut modules, 25);
    assert_eq!(network.storage.item_count(iron()), 64);

    // Something else on the network drains 20 iron.
    let drained = network
        .storage
        .extract_item(iron(), 20, restock_core::storage::Action::Execute);
    assert_eq!(drained, 20);

    step_n(&mut network, &mut modules, 20);
    assert_eq!(network.storage.item_count(iron()), 64);
    assert!(!requester_module(&modules).is_missing_items(node));
}

// ===========================================================================
// Power
// ===========================================================================

#[test]
fn power_outage_pauses_and_resumes_reconciliation() {
    let (mut network, _node, mut modules) = iron_requester_network(50, 64);

    step_n(&mut network, &mut modules, 2);
    assert_eq!(network.storage.item_count(iron()), 32);

    // A node the budget cannot cover takes the network down.
    let hungry = network.add_node(1_000);
    step_n(&mut network, &mut modules, 40);
    assert_eq!(network.storage.item_count(iron()), 32);

    let events = network.take_events();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, NetworkEvent::PowerLost { .. }))
    );

    network.remove_node(hungry);
    step_n(&mut network, &mut modules, 40);
    assert_eq!(network.storage.item_count(iron()), 64);

    let events = network.take_events();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, NetworkEvent::PowerRestored { .. }))
    );
}

// ===========================================================================
// Filter changes mid-flight
// ===========================================================================

#[test]
fn filter_switch_abandons_the_task_without_cancelling() {
    let mut network = Network::new(100);
    network
        .crafting
        .register_item_pattern(iron(), slow_pattern(50));
    network
        .crafting
        .register_fluid_pattern(water(), instant_pattern());

    let config = SimConfig::default();
    let node = network.add_node(config.requester_energy_usage);
    let mut module = RequesterModule::new(config);
    module.attach(node);
    module.set_item_filter(node, Some(iron()));
    module.set_amount(node, 64);
    let mut modules: Vec<Box<dyn NodeModule>> = vec![Box::new(module)];

    // Tick 0 issues an iron request that will not finish until tick 50.
    step_n(&mut network, &mut modules, 5);
    assert_eq!(network.crafting.task_count(), 1);

    // Reconfigure to fluids while the iron task is in flight.
    let module = requester_module_mut(&mut modules);
    module.set_filter_mode(node, FilterMode::Fluids);
    module.set_fluid_filter(node, Some(water()));

    // The in-flight task blocks further requests but keeps running.
    step_n(&mut network, &mut modules, 40); // through tick 44
    assert_eq!(network.crafting.task_count(), 1);
    assert_eq!(network.storage.fluid_amount(water()), 0);

    // The abandoned task still delivers; the next cycle requests fluid.
    step_n(&mut network, &mut modules, 20); // through tick 64
    assert_eq!(network.storage.item_count(iron()), 32);
    assert_eq!(network.storage.fluid_amount(water()), 64);
}

// ===========================================================================
// Item/fluid split
// ===========================================================================

#[test]
fn fluid_requests_bypass_the_item_cap() {
    let mut network = Network::new(100);
    network
        .crafting
        .register_fluid_pattern(water(), instant_pattern());

    let config = SimConfig::default();
    let node = network.add_node(config.requester_energy_usage);
    let mut module = RequesterModule::new(config);
    module.attach(node);
    module.set_filter_mode(node, FilterMode::Fluids);
    module.set_fluid_filter(node, Some(water()));
    module.set_amount(node, 16_000);
    let mut modules: Vec<Box<dyn NodeModule>> = vec![Box::new(module)];

    // One cycle covers the entire fluid deficit.
    step_n(&mut network, &mut modules, 2);
    assert_eq!(network.storage.fluid_amount(water()), 16_000);
}

#[test]
fn unpatterned_resource_reports_missing_without_a_task() {
    let mut network = Network::new(100);
    // No crafting pattern registered at all.

    let config = SimConfig::default();
    let node = network.add_node(config.requester_energy_usage);
    let mut module = RequesterModule::new(config);
    module.attach(node);
    module.set_item_filter(node, Some(iron()));
    module.set_amount(node, 64);
    let mut modules: Vec<Box<dyn NodeModule>> = vec![Box::new(module)];

    step_n(&mut network, &mut modules, 30);

    assert_eq!(network.crafting.task_count(), 0);
    assert!(requester_module(&modules).is_missing_items(node));
}
