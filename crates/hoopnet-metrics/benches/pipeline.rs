use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hoopnet_core::EdgeList;
use hoopnet_core::dataset::warriors_rockets_2017;
use hoopnet_metrics::graph::{AssistGraph, CostGraph};
use hoopnet_metrics::metrics::betweenness::betweenness_centrality;
use hoopnet_metrics::metrics::pagerank::{PageRankConfig, pagerank};
use hoopnet_metrics::analyze;

/// Roster sizes: one team, a full game, a season-long rotation.
const ROSTERS: [usize; 3] = [10, 26, 60];

/// Deterministic synthetic roster where each player assists up to three teammates.
fn synthetic_edges(players: usize) -> EdgeList {
    let names: Vec<String> = (0..players).map(|i| format!("P{i:03}")).collect();
    let mut triples = Vec::new();
    for (i, from) in names.iter().enumerate() {
        for step in 1..=3 {
            let to = &names[(i * 7 + step * 3) % players];
            if to != from {
                let assists = u32::try_from((i + step) % 5 + 1).unwrap_or(1);
                triples.push((from.as_str(), to.as_str(), assists));
            }
        }
    }
    EdgeList::from_triples(&triples).expect("synthetic edges are valid")
}

fn bench_builtin_game(c: &mut Criterion) {
    let ds = warriors_rockets_2017().expect("dataset");
    let config = PageRankConfig::default();
    c.bench_function("pipeline.warriors_2017", |b| {
        b.iter(|| black_box(analyze(&ds.edges, &config)))
    });
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics.roster");
    let config = PageRankConfig::default();

    for players in ROSTERS {
        let edges = synthetic_edges(players);
        let graph = AssistGraph::from_edges(&edges);
        let cost = CostGraph::from_assists(&graph);
        group.throughput(Throughput::Elements(edges.len() as u64));

        group.bench_with_input(BenchmarkId::new("pagerank", players), &graph, |b, g| {
            b.iter(|| black_box(pagerank(g, &config)))
        });

        group.bench_with_input(BenchmarkId::new("betweenness", players), &cost, |b, g| {
            b.iter(|| black_box(betweenness_centrality(g, true)))
        });

        group.bench_with_input(BenchmarkId::new("analyze", players), &edges, |b, e| {
            b.iter(|| black_box(analyze(e, &config)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_builtin_game, bench_metrics);
criterion_main!(benches);
