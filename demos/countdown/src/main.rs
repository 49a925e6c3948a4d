//! countdown — smallest runnable demo for the framebeat scheduler.
//!
//! Drives a fixed-rate tick loop and exercises all three timing policies
//! plus the `sequence` future: a `forever` spinner redraws on an interval,
//! an `every` warmup bar retires itself with a finalizer, and a launch
//! countdown runs as a sequence whose settlement ends the program.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use fb_future::sequence;
use fb_sched::{Finalizer, Scheduler};

// ── Constants ─────────────────────────────────────────────────────────────────

const TICK_MS:        u64 = 100; // 10 ticks per second
const SPIN_INTERVAL:  u64 = 2;
const WARMUP_TICKS:   u64 = 30;
const COUNT_INTERVAL: u64 = 10;  // one countdown step per second

fn main() -> Result<()> {
    let sched = Scheduler::new();

    sched
        .builder()
        .id("spinner")
        .label("ui")
        .forever(SPIN_INTERVAL, |counter, _delta_time| {
            const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
            print!("\r{} ", FRAMES[(counter / SPIN_INTERVAL) as usize % FRAMES.len()]);
            let _ = std::io::stdout().flush();
        })?;

    sched.every(WARMUP_TICKS, |counter, _delta_time| {
        if counter % 10 == 0 {
            println!("\rwarmup {counter}/{WARMUP_TICKS} ticks");
        }
        if counter == WARMUP_TICKS {
            Some(Box::new(|| println!("\rwarmup complete")) as Finalizer)
        } else {
            None
        }
    })?;

    let liftoff = sequence(&sched, COUNT_INTERVAL, ["3", "2", "1", "liftoff"], |word| {
        println!("\r{word}");
    })?;

    let started = Instant::now();
    let mut last = started;
    while !liftoff.is_settled() {
        let now = Instant::now();
        let delta_ms = now.duration_since(last).as_secs_f64() * 1_000.0;
        last = now;
        sched.tick(delta_ms);
        thread::sleep(Duration::from_millis(TICK_MS));
    }

    sched.remove_by_id("spinner");
    sched.tick(0.0); // drain the removal so the registry ends empty
    println!("done in {:.1}s", started.elapsed().as_secs_f64());
    Ok(())
}
