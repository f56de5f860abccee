use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use mallhub_auth::{Action, Permission, PermissionCatalog, PermissionSelection};

fn build_permissions(module_count: usize) -> Vec<Permission> {
    let mut perms = Vec::with_capacity(module_count * Action::ALL.len());
    let mut next_id = 1i64;
    // Arrive in reverse vocabulary order so grouping has to reorder.
    for module in 0..module_count {
        for action in Action::ALL.iter().rev() {
            perms.push(Permission::new(next_id, *action, format!("module_{module}")));
            next_id += 1;
        }
    }
    perms
}

fn bench_catalog_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_grouping");

    for module_count in [10usize, 100, 1_000].iter() {
        let perms = build_permissions(*module_count);
        group.throughput(Throughput::Elements(perms.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("group_by_module", module_count),
            &perms,
            |b, perms| {
                b.iter(|| PermissionCatalog::new(black_box(perms.clone())));
            },
        );
    }

    group.finish();
}

fn bench_module_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("module_toggle");

    for module_count in [10usize, 100, 1_000].iter() {
        let catalog = PermissionCatalog::new(build_permissions(*module_count));
        group.bench_with_input(
            BenchmarkId::new("toggle_every_module_on_then_snapshot", module_count),
            &catalog,
            |b, catalog| {
                b.iter(|| {
                    let mut selection = PermissionSelection::new();
                    for module in catalog.modules() {
                        selection.toggle_module(catalog, module.module(), true);
                    }
                    black_box(selection.snapshot(catalog))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_catalog_grouping, bench_module_toggle);
criterion_main!(benches);
