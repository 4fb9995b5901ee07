use cache::AdjacencyCache;
use engine::fixture::StaticProvider;
use engine::{AdjacencyResolver, PathFinder, SearchConfig};
use protocol::{MovieId, SearchError};
use rustc_hash::FxHashSet;
use std::sync::Arc;

fn ids(raw: &[i64]) -> Vec<MovieId> {
    raw.iter().copied().map(MovieId).collect()
}

/// A chain graph: consecutive movies linked through distinct persons.
fn chain(movies: &[i64]) -> StaticProvider {
    let mut provider = StaticProvider::new();
    for (i, pair) in movies.windows(2).enumerate() {
        provider = provider.with_link(pair[0], pair[1], 9000 + i as i64);
    }
    provider
}

#[tokio::test]
async fn same_title_is_a_trivial_path_with_no_expansion() {
    let provider = Arc::new(StaticProvider::new().with_title("The Iron Claw", 500));
    let finder = PathFinder::new(provider.clone());

    let path = finder.find_path("The Iron Claw", "The Iron Claw").await.unwrap();
    assert_eq!(path, ids(&[500]));
    assert_eq!(provider.expansion_calls(), 0);
}

#[tokio::test]
async fn unknown_title_is_reported() {
    let provider = Arc::new(StaticProvider::new().with_title("Up", 1));
    let finder = PathFinder::new(provider);

    let err = finder.find_path("Up", "No Such Film").await.unwrap_err();
    match err {
        SearchError::TitleNotFound(title) => assert_eq!(title, "No Such Film"),
        other => panic!("expected TitleNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn one_hop_through_a_shared_cast_member() {
    let provider = Arc::new(
        StaticProvider::new()
            .with_title("left", 500)
            .with_title("right", 1037)
            .with_link(500, 1037, 42),
    );
    let finder = PathFinder::new(provider);

    let path = finder.find_path("left", "right").await.unwrap();
    assert_eq!(path, ids(&[500, 1037]));
}

#[tokio::test]
async fn star_seeded_in_cache_needs_no_provider_at_all() {
    // 500 <-> {1037, 3129, 147, 2969}, each a reciprocal neighbor, nothing
    // else: the engine must run entirely out of the cache.
    let cache = Arc::new(AdjacencyCache::new());
    let leaves = [1037i64, 3129, 147, 2969];
    cache.put_neighbors(MovieId(500), leaves.iter().map(|&m| MovieId(m)).collect());
    for &leaf in &leaves {
        cache.put_neighbors(MovieId(leaf), std::iter::once(MovieId(500)).collect());
    }

    let provider = Arc::new(StaticProvider::new());
    let finder = PathFinder::with_cache(provider.clone(), cache);

    let path = finder
        .find_path_between(MovieId(500), MovieId(1037))
        .await
        .unwrap();
    assert_eq!(path, ids(&[500, 1037]));
    assert_eq!(provider.expansion_calls(), 0);
}

#[tokio::test]
async fn three_hop_chain_meets_in_the_middle() {
    let provider = Arc::new(chain(&[500, 680, 1037, 14839]));
    let finder = PathFinder::new(provider);

    // Whichever side the meeting lands on, the only path is the chain itself.
    let path = finder
        .find_path_between(MovieId(500), MovieId(14839))
        .await
        .unwrap();
    assert_eq!(path, ids(&[500, 680, 1037, 14839]));
}

#[tokio::test]
async fn chain_search_with_parallelism_of_one() {
    let provider = Arc::new(chain(&[1, 2, 3, 4, 5, 6]));
    let finder = PathFinder::new(provider).with_config(SearchConfig {
        max_parallel: 1,
        search_factor: 0,
    });

    let path = finder
        .find_path_between(MovieId(1), MovieId(6))
        .await
        .unwrap();
    assert_eq!(path, ids(&[1, 2, 3, 4, 5, 6]));
}

#[tokio::test]
async fn disconnected_components_yield_no_path() {
    let provider = Arc::new(
        StaticProvider::new()
            .with_link(1, 2, 71)
            .with_link(2, 3, 72)
            .with_link(4, 5, 73),
    );
    let finder = PathFinder::new(provider);

    let err = finder
        .find_path_between(MovieId(1), MovieId(4))
        .await
        .unwrap_err();
    match err {
        SearchError::NoPath { src, dest } => {
            assert_eq!(src, MovieId(1));
            assert_eq!(dest, MovieId(4));
        }
        other => panic!("expected NoPath, got {other:?}"),
    }
}

#[tokio::test]
async fn provider_failure_aborts_the_search() {
    // Both roots fail their cast lookup, so the first level of whichever side
    // runs first surfaces the error and tears the other side down.
    let provider = Arc::new(chain(&[1, 2, 3, 4]).failing_on(1).failing_on(4));
    let finder = PathFinder::new(provider);

    let err = finder
        .find_path_between(MovieId(1), MovieId(4))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Provider(_)), "got {err:?}");
}

#[tokio::test]
async fn shortest_route_wins_over_longer_alternatives() {
    // Diamond 1-2-4 / 1-3-4 plus a three-hop detour 1-5-6-4.
    let provider = Arc::new(
        StaticProvider::new()
            .with_link(1, 2, 81)
            .with_link(2, 4, 82)
            .with_link(1, 3, 83)
            .with_link(3, 4, 84)
            .with_link(1, 5, 85)
            .with_link(5, 6, 86)
            .with_link(6, 4, 87),
    );
    let cache = Arc::new(AdjacencyCache::new());
    let finder = PathFinder::with_cache(provider.clone(), cache.clone());

    let path = finder
        .find_path_between(MovieId(1), MovieId(4))
        .await
        .unwrap();

    assert_eq!(path.len(), 3);
    assert_eq!(path.first(), Some(&MovieId(1)));
    assert_eq!(path.last(), Some(&MovieId(4)));

    // Every consecutive pair must be adjacent per the resolver.
    let resolver = AdjacencyResolver::new(provider, cache, 0);
    for pair in path.windows(2) {
        let neighbors = resolver.neighbors(pair[0]).await.unwrap();
        assert!(
            neighbors.contains(&pair[1]),
            "{} and {} are not adjacent",
            pair[0],
            pair[1]
        );
    }
}

#[tokio::test]
async fn adjacency_is_symmetric() {
    let provider = Arc::new(
        StaticProvider::new()
            .with_link(500, 1037, 11)
            .with_link(500, 3129, 12)
            .with_link(680, 1037, 13)
            .with_link(680, 3129, 11),
    );
    let resolver = Arc::new(AdjacencyResolver::new(
        provider,
        Arc::new(AdjacencyCache::new()),
        0,
    ));

    for &movie in &ids(&[500, 680, 1037, 3129]) {
        let neighbors = resolver.neighbors(movie).await.unwrap();
        for &neighbor in neighbors.iter() {
            let reverse = resolver.neighbors(neighbor).await.unwrap();
            assert!(
                reverse.contains(&movie),
                "{movie} -> {neighbor} has no reverse edge"
            );
        }
    }
}

#[tokio::test]
async fn concurrent_resolutions_agree_and_cache_once_filled_is_stable() {
    let provider = Arc::new(
        StaticProvider::new()
            .with_link(500, 1037, 11)
            .with_link(500, 3129, 12)
            .with_link(500, 147, 13)
            .with_link(500, 2969, 14),
    );
    let resolver = Arc::new(AdjacencyResolver::new(
        provider,
        Arc::new(AdjacencyCache::new()),
        0,
    ));

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..16 {
        let resolver = resolver.clone();
        tasks.spawn(async move { resolver.neighbors(MovieId(500)).await });
    }

    let expected: FxHashSet<MovieId> = ids(&[1037, 3129, 147, 2969]).into_iter().collect();
    while let Some(joined) = tasks.join_next().await {
        let neighbors = joined.unwrap().unwrap();
        assert_eq!(*neighbors, expected);
    }

    // Fill-on-miss is idempotent: a later call still sees the same set.
    assert_eq!(*resolver.neighbors(MovieId(500)).await.unwrap(), expected);
}

#[tokio::test]
async fn search_factor_bounds_per_person_fanout() {
    // One prolific person links 1 to everything; search_factor 3 keeps only
    // the first three filmography entries (the queried movie itself first).
    let provider = Arc::new(
        StaticProvider::new()
            .with_link(1, 2, 50)
            .with_link(1, 3, 50)
            .with_link(1, 4, 50)
            .with_link(1, 5, 50),
    );
    let resolver = AdjacencyResolver::new(provider, Arc::new(AdjacencyCache::new()), 3);

    let neighbors = resolver.neighbors(MovieId(1)).await.unwrap();
    assert_eq!(neighbors.len(), 2, "cap of 3 minus the movie itself");
}
