// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --example house_way_rules
// ```
use parking_lot::Mutex;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use asiapoker_eval::{house_way::RULES, *};

fn main() {
    const NUM_TASKS: usize = 4;

    // Nines to Aces and the Joker, 480,700 hands.
    let deck = Deck::from_cards(
        Deck::default()
            .into_iter()
            .filter(|c| c.is_joker() || c.value() >= 9),
    );

    let house_way = HouseWay::new();
    let rules = house_way.rules();

    // Per task counters and caches to avoid contention.
    let task_counters = (0..NUM_TASKS)
        .map(|_| rules.iter().map(|_| AtomicU64::new(0)).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let task_caches = (0..NUM_TASKS)
        .map(|_| Mutex::new(ScoreCache::new()))
        .collect::<Vec<_>>();

    let now = Instant::now();

    deck.par_for_each(NUM_TASKS, 7, |task_id, cards| {
        let hand: [Card; 7] = cards.try_into().unwrap();
        let setting = house_way
            .setting(&hand, &mut task_caches[task_id].lock())
            .unwrap();
        assert!(!setting.partition.foul, "fouled {}", setting.partition.partition);

        let idx = rules.iter().position(|r| r.name == setting.rule).unwrap();
        task_counters[task_id][idx].fetch_add(1, Ordering::Relaxed);
    });

    let elapsed = now.elapsed().as_secs_f64();

    let total = deck.hands_count(7) as u64;
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for (idx, rule) in RULES.iter().enumerate() {
        let count = task_counters
            .iter()
            .map(|counts| counts[idx].load(Ordering::Relaxed))
            .sum::<u64>();
        println!(
            "{:<24} {count:>8} {:>6.2}%",
            rule.name,
            100.0 * count as f64 / total as f64
        );
    }
}
