use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use printshop_core::{quote, Material, SessionIssuer, SystemClock};
use std::sync::Arc;
use uuid::Uuid;

fn bench_quote(c: &mut Criterion) {
  let mut group = c.benchmark_group("quote");
  for raw in ["pla", "resin", "carbon fiber"] {
    group.bench_with_input(BenchmarkId::from_parameter(raw), raw, |b, raw| {
      b.iter(|| {
        let material = Material::parse(black_box(raw));
        quote(&material, black_box(true))
      })
    });
  }
  group.finish();
}

fn bench_session_tokens(c: &mut Criterion) {
  let issuer = SessionIssuer::new(b"bench-secret", Arc::new(SystemClock)).expect("issuer");
  let user_id = Uuid::new_v4();
  let token = issuer.issue(user_id, "bench@example.com").expect("token");

  c.bench_function("session_issue", |b| {
    b.iter(|| issuer.issue(black_box(user_id), black_box("bench@example.com")))
  });
  c.bench_function("session_verify", |b| b.iter(|| issuer.verify(black_box(&token))));
}

criterion_group!(benches, bench_quote, bench_session_tokens);
criterion_main!(benches);
