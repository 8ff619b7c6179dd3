//! Opt-in timing of the per-tick hot paths
//!
//! Enable with environment variable: SNAKE_ARENA_PROFILE=1
//! Counters accumulate per thread and are merged into globals with `merge_thread_local`,
//! so batch rounds running on rayon workers can be aggregated.

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// Timed sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    FloodFill,
    ScoreMoves,
    Step,
}

const CATEGORY_COUNT: usize = 3;

impl Category {
    fn index(self) -> usize {
        match self {
            Category::FloodFill => 0,
            Category::ScoreMoves => 1,
            Category::Step => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Category::FloodFill => "Flood Fill",
            Category::ScoreMoves => "Move Scoring",
            Category::Step => "Round Step",
        }
    }
}

thread_local! {
    static TIMES: RefCell<[u64; CATEGORY_COUNT]> = const { RefCell::new([0; CATEGORY_COUNT]) };
    static COUNTS: RefCell<[usize; CATEGORY_COUNT]> = const { RefCell::new([0; CATEGORY_COUNT]) };
}

static GLOBAL_TIMES: [AtomicU64; CATEGORY_COUNT] =
    [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];
static GLOBAL_COUNTS: [AtomicUsize; CATEGORY_COUNT] =
    [AtomicUsize::new(0), AtomicUsize::new(0), AtomicUsize::new(0)];

#[inline]
pub fn is_profiling_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var("SNAKE_ARENA_PROFILE").is_ok())
}

pub struct ProfileGuard {
    start: Instant,
    category: Category,
}

impl ProfileGuard {
    pub fn new(category: Category) -> Option<Self> {
        if is_profiling_enabled() {
            Some(ProfileGuard {
                start: Instant::now(),
                category,
            })
        } else {
            None
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed_ns = self.start.elapsed().as_nanos() as u64;
        let idx = self.category.index();
        TIMES.with(|t| t.borrow_mut()[idx] += elapsed_ns);
        COUNTS.with(|c| c.borrow_mut()[idx] += 1);
    }
}

/// Moves this thread's counters into the global totals
pub fn merge_thread_local() {
    if !is_profiling_enabled() {
        return;
    }

    TIMES.with(|t| {
        for (global, local) in GLOBAL_TIMES.iter().zip(t.borrow_mut().iter_mut()) {
            global.fetch_add(*local, Ordering::Relaxed);
            *local = 0;
        }
    });
    COUNTS.with(|c| {
        for (global, local) in GLOBAL_COUNTS.iter().zip(c.borrow_mut().iter_mut()) {
            global.fetch_add(*local, Ordering::Relaxed);
            *local = 0;
        }
    });
}

pub fn print_report(total_time_ms: u64) {
    if !is_profiling_enabled() {
        return;
    }

    let total_ns = total_time_ms * 1_000_000;

    eprintln!("\n═══════════════════════════════════════════════════════════");
    eprintln!("                 PERFORMANCE PROFILE");
    eprintln!("═══════════════════════════════════════════════════════════");
    eprintln!("Total Time: {}ms\n", total_time_ms);

    for category in [Category::Step, Category::ScoreMoves, Category::FloodFill] {
        let time = GLOBAL_TIMES[category.index()].load(Ordering::Relaxed);
        let count = GLOBAL_COUNTS[category.index()].load(Ordering::Relaxed);
        let ms = time as f64 / 1_000_000.0;
        let pct = if total_ns > 0 { 100.0 * time as f64 / total_ns as f64 } else { 0.0 };
        let avg_us = if count > 0 { time as f64 / (count * 1000) as f64 } else { 0.0 };

        eprintln!("{}:", category.label());
        eprintln!("  Time:     {:.2}ms ({:.1}%)", ms, pct);
        eprintln!("  Calls:    {}", count);
        eprintln!("  Avg:      {:.2}µs/call\n", avg_us);
    }

    eprintln!("═══════════════════════════════════════════════════════════\n");
}

pub fn reset() {
    for global in GLOBAL_TIMES.iter() {
        global.store(0, Ordering::Relaxed);
    }
    for global in GLOBAL_COUNTS.iter() {
        global.store(0, Ordering::Relaxed);
    }
}

#[macro_export]
macro_rules! profile {
    ($category:expr, $code:block) => {{
        let _guard = $crate::profiler::ProfileGuard::new($category);
        $code
    }};
}
