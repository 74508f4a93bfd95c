use common::{OrderId, UserId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Cart, Money, Order, OrderItem, ProductId, ShippingAddress};

fn bench_cart_add_item(c: &mut Criterion) {
    c.bench_function("domain/cart_add_item", |b| {
        b.iter(|| {
            let mut cart = Cart::new(UserId::new("bench-user"));
            for i in 0..20 {
                cart.add_item(
                    ProductId::new(format!("SKU-{i:03}")),
                    Money::from_cents(1000),
                    1,
                )
                .unwrap();
            }
            cart
        });
    });
}

fn bench_cart_merge(c: &mut Criterion) {
    let mut cart = Cart::new(UserId::new("bench-user"));
    for i in 0..50 {
        cart.add_item(
            ProductId::new(format!("SKU-{i:03}")),
            Money::from_cents(1000),
            1,
        )
        .unwrap();
    }

    c.bench_function("domain/cart_merge_existing", |b| {
        b.iter(|| {
            let mut cart = cart.clone();
            cart.add_item(ProductId::new("SKU-025"), Money::from_cents(1000), 1)
                .unwrap();
            cart
        });
    });
}

fn bench_cart_total(c: &mut Criterion) {
    let mut cart = Cart::new(UserId::new("bench-user"));
    for i in 0..100 {
        cart.add_item(
            ProductId::new(format!("SKU-{i:03}")),
            Money::from_cents(999),
            3,
        )
        .unwrap();
    }

    c.bench_function("domain/cart_total_amount", |b| {
        b.iter(|| cart.total_amount());
    });
}

fn bench_order_lifecycle(c: &mut Criterion) {
    c.bench_function("domain/order_lifecycle", |b| {
        b.iter(|| {
            let mut order = Order::new(OrderId::new(), UserId::new("bench-user"));
            order
                .add_item(OrderItem::new("line-1", "SKU-001", 2, Money::from_cents(1000)))
                .unwrap();
            order.set_shipping_address(ShippingAddress::new(
                "1 Main St",
                "Springfield",
                "12345",
                "US",
            ));
            order.confirm().unwrap();
            order.ship().unwrap();
            order.deliver().unwrap();
            order
        });
    });
}

criterion_group!(
    benches,
    bench_cart_add_item,
    bench_cart_merge,
    bench_cart_total,
    bench_order_lifecycle
);
criterion_main!(benches);
