use criterion::{black_box, criterion_group, criterion_main, Criterion};
use storefront::auth::{Role, Session, SessionStore};
use storefront::routes::{decide, Navigator, RoleSet, Router};

fn bench_guard_decision(c: &mut Criterion) {
    let session = Session::authenticated("token", Role::Customer);

    c.bench_function("guard_decide_single_role", |b| {
        b.iter(|| decide(black_box(&session), black_box(Role::Admin)))
    });

    c.bench_function("guard_decide_role_list", |b| {
        b.iter(|| decide(black_box(&session), black_box([Role::Admin, Role::Customer])))
    });

    c.bench_function("role_set_from_vec", |b| {
        b.iter(|| RoleSet::from(black_box(vec![Role::Customer, Role::Admin])))
    });
}

fn bench_route_resolution(c: &mut Criterion) {
    let router = Router::default();
    let admin = Session::authenticated("token", Role::Admin);
    let anon = Session::anonymous();

    c.bench_function("resolve_admin_authorized", |b| {
        b.iter(|| router.resolve(black_box("/admin"), black_box(&admin)))
    });

    c.bench_function("resolve_home_unauthenticated", |b| {
        b.iter(|| router.resolve(black_box("/home"), black_box(&anon)))
    });

    c.bench_function("resolve_unmatched", |b| {
        b.iter(|| router.resolve(black_box("/nowhere/at/all?x=1"), black_box(&admin)))
    });
}

fn bench_navigation(c: &mut Criterion) {
    let session = SessionStore::in_memory();
    session.login("token", Role::Customer).unwrap();
    let navigator = Navigator::new(Router::default(), session);

    c.bench_function("navigate_with_redirect", |b| {
        b.iter(|| navigator.navigate(black_box("/admin")))
    });
}

criterion_group!(
    benches,
    bench_guard_decision,
    bench_route_resolution,
    bench_navigation
);
criterion_main!(benches);
