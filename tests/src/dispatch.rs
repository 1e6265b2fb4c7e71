use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use holehe_common::capability::Capability;
use holehe_common::config::{Config, FaultPolicy};
use holehe_common::record::ResultRecord;
use holehe_common::Error;
use holehe_core::aggregate::{self, RunResult};
use holehe_core::dispatcher::Dispatcher;
use holehe_core::output;
use holehe_core::registry::Registry;

use crate::stubs::{Stub, Verdict};

const EMAIL: &str = "target@example.com";

async fn run_with(cfg: &Config, selection: Vec<Arc<dyn Capability>>) -> holehe_common::Result<Vec<ResultRecord>> {
    Dispatcher::new(cfg)?.run(EMAIL, selection).await
}

fn names(records: &[ResultRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn exists_rate_limit_and_absent_are_classified() {
    let selection = vec![
        Stub::new("c", Verdict::Absent).arc(),
        Stub::new("b", Verdict::RateLimited).arc(),
        Stub::new("a", Verdict::Exists).arc(),
    ];

    let records = run_with(&Config::default(), selection).await.unwrap();
    assert_eq!(records.len(), 3);

    let result: RunResult = aggregate::classify(records);
    assert_eq!(names(&result.exists), ["a"]);
    assert_eq!(names(&result.rate_limit), ["b"]);
    assert_eq!(result.exists[0].others.as_ref().unwrap()["Email"], EMAIL);
}

#[tokio::test]
async fn order_follows_names_not_completion() {
    // The alphabetically first check finishes last.
    let selection = vec![
        Stub::new("alpha", Verdict::Exists).delayed(Duration::from_millis(120)).arc(),
        Stub::new("bravo", Verdict::Exists).delayed(Duration::from_millis(60)).arc(),
        Stub::new("charlie", Verdict::Exists).arc(),
        Stub::new("delta", Verdict::RateLimited).delayed(Duration::from_millis(90)).arc(),
        Stub::new("echo", Verdict::RateLimited).delayed(Duration::from_millis(30)).arc(),
    ];

    let records = run_with(&Config::default(), selection).await.unwrap();
    assert_eq!(names(&records)[0], "charlie");

    let result = aggregate::classify(records);
    assert_eq!(names(&result.exists), ["alpha", "bravo", "charlie"]);
    assert_eq!(names(&result.rate_limit), ["delta", "echo"]);
}

#[tokio::test]
async fn checks_run_concurrently() {
    const N: usize = 25;
    const DELAY: Duration = Duration::from_millis(200);
    let finished = Arc::new(AtomicUsize::new(0));

    let selection: Vec<Arc<dyn Capability>> = (0..N)
        .map(|i| {
            let name: &'static str = Box::leak(format!("stub{i:02}").into_boxed_str());
            Stub::new(name, Verdict::Absent)
                .delayed(DELAY)
                .counting(Arc::clone(&finished))
                .arc()
        })
        .collect();

    let start = Instant::now();
    let records = run_with(&Config::default(), selection).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(records.len(), N);
    assert_eq!(finished.load(Ordering::SeqCst), N);
    assert!(
        elapsed < DELAY * 5,
        "fan-out took {elapsed:?}, sequential would be {:?}",
        DELAY * N as u32
    );
}

#[tokio::test]
async fn serialized_output_is_reproducible() {
    let selection = || {
        vec![
            Stub::new("zeta", Verdict::Exists).delayed(Duration::from_millis(30)).arc(),
            Stub::new("eta", Verdict::RateLimited).delayed(Duration::from_millis(10)).arc(),
            Stub::new("theta", Verdict::Exists).arc(),
            Stub::new("iota", Verdict::Absent).arc(),
        ]
    };

    let mut rendered: Vec<String> = Vec::new();
    for _ in 0..3 {
        let records = run_with(&Config::default(), selection()).await.unwrap();
        rendered.push(output::render(&aggregate::classify(records)).unwrap());
    }

    assert!(rendered.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn isolated_fault_keeps_one_record_per_check() {
    let selection = vec![
        Stub::new("broken", Verdict::Fails).arc(),
        Stub::new("slow", Verdict::Exists).delayed(Duration::from_millis(50)).arc(),
        Stub::new("quick", Verdict::RateLimited).arc(),
    ];

    let records = run_with(&Config::default(), selection).await.unwrap();
    assert_eq!(records.len(), 3);

    let broken = records.iter().find(|r| r.name == "broken").unwrap();
    assert!(broken.error && !broken.exists && !broken.rate_limit);

    let result = aggregate::classify(records);
    assert_eq!(names(&result.exists), ["slow"]);
    assert_eq!(names(&result.rate_limit), ["quick"]);
}

#[tokio::test]
async fn abort_all_cancels_siblings() {
    let finished = Arc::new(AtomicUsize::new(0));
    let cfg = Config {
        fault_policy: FaultPolicy::AbortAll,
        ..Config::default()
    };
    let selection = vec![
        Stub::new("broken", Verdict::Fails).arc(),
        Stub::new("slow-1", Verdict::Exists)
            .delayed(Duration::from_secs(5))
            .counting(Arc::clone(&finished))
            .arc(),
        Stub::new("slow-2", Verdict::Exists)
            .delayed(Duration::from_secs(5))
            .counting(Arc::clone(&finished))
            .arc(),
    ];

    let start = Instant::now();
    let err = run_with(&cfg, selection).await.unwrap_err();

    assert!(matches!(err, Error::CapabilityFault { ref name, .. } if name == "broken"));
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(finished.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn registry_selection_feeds_the_dispatcher() {
    let registry = Registry::from_capabilities([
        Stub::new("one", Verdict::Exists).arc(),
        Stub::new("two", Verdict::Absent).arc(),
    ])
    .unwrap();

    let cfg = Config::default();
    let records = run_with(&cfg, registry.select(&cfg)).await.unwrap();
    let result = aggregate::classify(records);

    assert_eq!(result.exists.len() + result.rate_limit.len(), 1);
}

#[tokio::test]
async fn empty_run_renders_empty_buckets() {
    let records = run_with(&Config::default(), Vec::new()).await.unwrap();
    let json = output::render(&aggregate::classify(records)).unwrap();
    assert_eq!(json, "{\n    \"exists\": [],\n    \"rate_limit\": []\n}");
}
