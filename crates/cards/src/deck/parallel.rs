// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand iteration.
use std::thread;

use super::{Card, Deck, ksubset};

impl Deck {
    /// Parallel for each, calls the `f` closure for each k-cards hand.
    ///
    /// The closure takes an usize that is the task identifier (0..num_tasks)
    /// and a slice of cards of length k, each task visits a contiguous range of
    /// hands so that per task state can be kept without contention.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn par_for_each<F>(&self, num_tasks: usize, k: usize, f: F)
    where
        F: Fn(usize, &[Card]) + Send + Sync,
    {
        assert!((1..=ksubset::MAX_K).contains(&k), "1 <= k <= 7");
        assert!(num_tasks > 0);

        if k > self.cards.len() {
            return;
        }

        let n = self.cards.len();
        let num_hands = ksubset::nck(n, k);
        let hands_per_task = num_hands.div_ceil(num_tasks);

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let start = task_id * hands_per_task;
                if start >= num_hands {
                    break;
                }

                let count = hands_per_task.min(num_hands - start);
                let f = &f;
                s.spawn(move || {
                    let mut h = [Card::JOKER; ksubset::MAX_K];
                    ksubset::for_each_ksubset(n, k, start, count, |p| {
                        for (idx, &pos) in p.iter().enumerate() {
                            h[idx] = self.cards[pos];
                        }

                        f(task_id, &h[..k]);
                    });
                });
            }
        });
    }
}
