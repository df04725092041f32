//! End-to-end exercises of the domain operations over the in-memory store.

use std::sync::Arc;

use common::RecordId;
use domain::{
    Customer, DomainError, FixedIdentity, MemoryImageStore, NewCustomer, NewPackage,
    NewPartialShipment, NewShipment, Operations, PartialShipment, PaymentStatus, Shipment,
};
use table_store::MemoryTableStore;

fn ops() -> Operations<MemoryTableStore> {
    Operations::new(
        MemoryTableStore::new(),
        Arc::new(FixedIdentity::anonymous()),
        Arc::new(MemoryImageStore::new()),
    )
}

fn customer_input(name: &str) -> NewCustomer {
    NewCustomer {
        name: name.to_string(),
        phone: "0800".to_string(),
        address: "12 Marina".to_string(),
        origin: None,
        note: None,
    }
}

fn shipment_input(destination: &str) -> NewShipment {
    NewShipment {
        destination: destination.to_string(),
        driver_name: None,
        driver_vehicle: None,
        note: None,
    }
}

fn partial_input(shipment: RecordId, customer: RecordId) -> NewPartialShipment {
    NewPartialShipment {
        shipment_id: shipment,
        customer_id: customer,
        cost: 100.0,
        discount_amount: 0.0,
        extra_cost_amount: 0.0,
        amount_paid: 0.0,
        payment_status: PaymentStatus::Unpaid,
        receiver_name: None,
        receiver_phone: None,
        note: None,
    }
}

struct TransferFixture {
    ops: Operations<MemoryTableStore>,
    lagos: Shipment,
    abuja: Shipment,
    partial: PartialShipment,
}

/// One customer, two open shipments, one partial shipment under the first
/// with a single 2×1×1 package in 3 units weighing 4 each.
async fn transfer_fixture() -> TransferFixture {
    let ops = ops();
    let customer = ops.create_customer(customer_input("Ada")).await.unwrap();
    let lagos = ops.create_shipment(shipment_input("Lagos")).await.unwrap();
    let abuja = ops.create_shipment(shipment_input("Abuja")).await.unwrap();

    let partial = ops
        .create_partial_shipment(partial_input(lagos.id, customer.id))
        .await
        .unwrap();
    ops.add_package(NewPackage {
        partial_shipment_id: partial.id,
        length: 2.0,
        width: 1.0,
        height: 1.0,
        weight: 4.0,
        units: 3,
    })
    .await
    .unwrap();

    TransferFixture {
        ops,
        lagos,
        abuja,
        partial,
    }
}

async fn shipment(ops: &Operations<MemoryTableStore>, id: RecordId) -> Shipment {
    ops.repo().get_required(id).await.unwrap()
}

#[tokio::test]
async fn transfer_moves_totals_and_reassigns_partial() {
    let fx = transfer_fixture().await;

    // Package: volume 2×1×1×3 = 6, weight 4×3 = 12.
    let lagos = shipment(&fx.ops, fx.lagos.id).await;
    assert_eq!(lagos.total_volume, 6.0);
    assert_eq!(lagos.total_weight, 12.0);

    let moved = fx
        .ops
        .transfer_partial_shipment(fx.partial.id, fx.lagos.id, fx.abuja.id)
        .await
        .unwrap();
    assert_eq!(moved.shipment_id, fx.abuja.id);

    let lagos = shipment(&fx.ops, fx.lagos.id).await;
    let abuja = shipment(&fx.ops, fx.abuja.id).await;
    assert_eq!(lagos.total_volume, 0.0);
    assert_eq!(lagos.total_weight, 0.0);
    assert_eq!(abuja.total_volume, 6.0);
    assert_eq!(abuja.total_weight, 12.0);
}

#[tokio::test]
async fn transfer_to_same_shipment_is_invalid() {
    let fx = transfer_fixture().await;

    let result = fx
        .ops
        .transfer_partial_shipment(fx.partial.id, fx.lagos.id, fx.lagos.id)
        .await;
    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
}

#[tokio::test]
async fn transfer_from_closed_source_is_rejected_without_mutation() {
    let fx = transfer_fixture().await;
    fx.ops.close_shipment(fx.lagos.id).await.unwrap();

    let result = fx
        .ops
        .transfer_partial_shipment(fx.partial.id, fx.lagos.id, fx.abuja.id)
        .await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));

    let partial: PartialShipment = fx.ops.repo().get_required(fx.partial.id).await.unwrap();
    assert_eq!(partial.shipment_id, fx.lagos.id);
    let lagos = shipment(&fx.ops, fx.lagos.id).await;
    assert_eq!(lagos.total_volume, 6.0);
    let abuja = shipment(&fx.ops, fx.abuja.id).await;
    assert_eq!(abuja.total_volume, 0.0);
}

#[tokio::test]
async fn transfer_to_closed_target_is_rejected_without_mutation() {
    let fx = transfer_fixture().await;
    fx.ops.close_shipment(fx.abuja.id).await.unwrap();

    let result = fx
        .ops
        .transfer_partial_shipment(fx.partial.id, fx.lagos.id, fx.abuja.id)
        .await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));

    let partial: PartialShipment = fx.ops.repo().get_required(fx.partial.id).await.unwrap();
    assert_eq!(partial.shipment_id, fx.lagos.id);
    let lagos = shipment(&fx.ops, fx.lagos.id).await;
    assert_eq!(lagos.total_volume, 6.0);
}

#[tokio::test]
async fn transfer_of_partial_not_in_stated_source_is_rejected() {
    let fx = transfer_fixture().await;
    let third = fx
        .ops
        .create_shipment(shipment_input("Kano"))
        .await
        .unwrap();

    // The partial belongs to Lagos, not Abuja.
    let result = fx
        .ops
        .transfer_partial_shipment(fx.partial.id, fx.abuja.id, third.id)
        .await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));

    let partial: PartialShipment = fx.ops.repo().get_required(fx.partial.id).await.unwrap();
    assert_eq!(partial.shipment_id, fx.lagos.id);
}

#[tokio::test]
async fn transfer_of_missing_partial_is_not_found() {
    let fx = transfer_fixture().await;

    let result = fx
        .ops
        .transfer_partial_shipment(RecordId::new(999), fx.lagos.id, fx.abuja.id)
        .await;
    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn transfer_with_no_packages_skips_total_adjustments() {
    let ops = ops();
    let customer = ops.create_customer(customer_input("Ada")).await.unwrap();
    let lagos = ops.create_shipment(shipment_input("Lagos")).await.unwrap();
    let abuja = ops.create_shipment(shipment_input("Abuja")).await.unwrap();
    let partial = ops
        .create_partial_shipment(partial_input(lagos.id, customer.id))
        .await
        .unwrap();

    let moved = ops
        .transfer_partial_shipment(partial.id, lagos.id, abuja.id)
        .await
        .unwrap();
    assert_eq!(moved.shipment_id, abuja.id);

    let abuja = shipment(&ops, abuja.id).await;
    assert_eq!(abuja.total_volume, 0.0);
    assert_eq!(abuja.total_weight, 0.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_balance_increments_lose_nothing() {
    let ops = ops();
    let customer = ops.create_customer(customer_input("Ada")).await.unwrap();

    let tasks: Vec<_> = (0..60)
        .map(|_| {
            let ops = ops.clone();
            let id = customer.id;
            tokio::spawn(async move { ops.increment_balance(id, 2.5).await.unwrap() })
        })
        .collect();
    futures_util::future::join_all(tasks).await;

    let customer: Customer = ops.repo().get_required(customer.id).await.unwrap();
    assert_eq!(customer.balance, 150.0);
}

#[tokio::test]
async fn delete_shipment_guard_and_cascade() {
    let fx = transfer_fixture().await;

    let result = fx.ops.delete_shipment(fx.lagos.id).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));

    // Removing the partial clears the reference and walks the totals down.
    fx.ops.delete_partial_shipment(fx.partial.id).await.unwrap();
    let lagos = shipment(&fx.ops, fx.lagos.id).await;
    assert_eq!(lagos.total_volume, 0.0);
    assert_eq!(lagos.total_weight, 0.0);

    fx.ops.delete_shipment(fx.lagos.id).await.unwrap();
    assert!(
        fx.ops
            .repo()
            .get::<Shipment>(fx.lagos.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn deleting_referenced_customer_is_rejected_until_partials_go() {
    let fx = transfer_fixture().await;
    let customer_id = fx.partial.customer_id;

    let result = fx.ops.delete_customer(customer_id).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));

    fx.ops.delete_partial_shipment(fx.partial.id).await.unwrap();
    fx.ops.delete_customer(customer_id).await.unwrap();
    assert!(
        fx.ops
            .repo()
            .get::<Customer>(customer_id)
            .await
            .unwrap()
            .is_none()
    );
}
