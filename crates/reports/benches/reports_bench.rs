use common::RecordId;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Customer, PartialShipment, PaymentStatus, Shipment};
use reports::{customer_summary, dashboard_summary, financial_summary};

fn shipments(n: i64) -> Vec<Shipment> {
    (1..=n)
        .map(|i| Shipment {
            id: RecordId::new(i),
            destination: format!("dest-{}", i % 7),
            date_created: chrono::Utc::now(),
            date_closed: None,
            is_open: i % 3 != 0,
            total_weight: (i % 40) as f64,
            total_volume: (i % 11) as f64,
            driver_name: None,
            driver_vehicle: None,
            note_id: None,
            created_by_user_id: None,
            updated_by_user_id: None,
        })
        .collect()
}

fn customers(n: i64) -> Vec<Customer> {
    (1..=n)
        .map(|i| Customer {
            id: RecordId::new(i),
            name: format!("customer-{i}"),
            phone: "0800".to_string(),
            address: "12 Marina".to_string(),
            origin: (i % 4 != 0).then(|| format!("origin-{}", i % 5)),
            balance: (i % 97) as f64,
            note_id: None,
            created_by_user_id: None,
            updated_by_user_id: None,
        })
        .collect()
}

fn partials(n: i64, customers: i64) -> Vec<PartialShipment> {
    (1..=n)
        .map(|i| PartialShipment {
            id: RecordId::new(i),
            shipment_id: RecordId::new(i % 20 + 1),
            customer_id: RecordId::new(i % customers + 1),
            cost: (i % 500) as f64,
            discount_amount: (i % 13) as f64,
            extra_cost_amount: (i % 7) as f64,
            amount_paid: (i % 250) as f64,
            payment_status: match i % 3 {
                0 => PaymentStatus::Paid,
                1 => PaymentStatus::PartiallyPaid,
                _ => PaymentStatus::Unpaid,
            },
            note_id: None,
            receiver_name: None,
            receiver_phone: None,
            created_by_user_id: None,
            updated_by_user_id: None,
        })
        .collect()
}

fn bench_dashboard(c: &mut Criterion) {
    let shipments = shipments(500);
    let partials = partials(5000, 200);

    c.bench_function("reports/dashboard_500_shipments_5000_partials", |b| {
        b.iter(|| dashboard_summary(&shipments, &partials));
    });
}

fn bench_financial(c: &mut Criterion) {
    let partials = partials(5000, 200);

    c.bench_function("reports/financial_5000_partials", |b| {
        b.iter(|| financial_summary(&partials));
    });
}

fn bench_customers(c: &mut Criterion) {
    let customers = customers(1000);
    let partials = partials(5000, 1000);

    c.bench_function("reports/customers_1000_customers", |b| {
        b.iter(|| customer_summary(&customers, &partials));
    });
}

criterion_group!(benches, bench_dashboard, bench_financial, bench_customers);
criterion_main!(benches);
