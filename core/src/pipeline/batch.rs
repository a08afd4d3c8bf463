//! pipeline/batch.rs
//! Conceal or reveal many images on a scoped worker pool.
//!
//! Design notes:
//! - Workers pull job indices from a bounded crossbeam channel and send
//!   `(index, result)` back; results are re-ordered to match the input.
//! - Every job runs the same `conceal`/`reveal` as the sequential path, so a
//!   batch never differs from calling them one by one.
//! - Inputs are borrowed; threads are scoped to the call.

use std::thread;

use crossbeam::channel::bounded;
use log::debug;

use crate::config::StegoConfig;
use crate::pixels::PixelBuffer;
use crate::types::StegoError;

use super::core::{conceal, reveal, ConcealParams, Concealed, RevealParams, Revealed};

/// Worker pool sizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelismProfile {
    pub worker_count: usize,
    /// Jobs queued ahead of the workers.
    pub inflight_jobs: usize,
}

impl ParallelismProfile {
    pub fn single_threaded() -> Self {
        Self { worker_count: 1, inflight_jobs: 1 }
    }

    /// One worker per core, leaving one core free.
    pub fn dynamic() -> Self {
        let worker_count = num_cpus::get().saturating_sub(1).max(1);
        Self { worker_count, inflight_jobs: worker_count * 2 }
    }

    pub fn with_workers(worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        Self { worker_count, inflight_jobs: worker_count * 2 }
    }
}

impl Default for ParallelismProfile {
    fn default() -> Self {
        Self::dynamic()
    }
}

/// One cover and what to hide in it.
#[derive(Debug, Clone)]
pub struct ConcealJob<'a> {
    pub cover: &'a PixelBuffer,
    pub params: ConcealParams<'a>,
}

fn run_indexed<T, R, F>(items: &[T], profile: &ParallelismProfile, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let workers = profile.worker_count.max(1).min(items.len().max(1));
    if workers == 1 {
        return items.iter().map(&f).collect();
    }

    let (job_tx, job_rx) = bounded::<usize>(profile.inflight_jobs.max(1));
    let (res_tx, res_rx) = bounded::<(usize, R)>(items.len());
    let f = &f;

    thread::scope(|s| {
        for id in 0..workers {
            let job_rx = job_rx.clone();
            let res_tx = res_tx.clone();
            s.spawn(move || {
                let mut done = 0usize;
                for idx in job_rx.iter() {
                    if res_tx.send((idx, f(&items[idx]))).is_err() {
                        break;
                    }
                    done += 1;
                }
                debug!("batch worker {} finished {} jobs", id, done);
            });
        }
        drop(job_rx);
        drop(res_tx);

        for idx in 0..items.len() {
            if job_tx.send(idx).is_err() {
                break;
            }
        }
        drop(job_tx);
    });

    let mut slots: Vec<Option<R>> = (0..items.len()).map(|_| None).collect();
    for (idx, out) in res_rx.try_iter() {
        slots[idx] = Some(out);
    }
    slots.into_iter().flatten().collect()
}

/// `conceal` over many jobs. Results are in input order.
pub fn conceal_batch(
    jobs: &[ConcealJob<'_>],
    config: &StegoConfig,
    profile: &ParallelismProfile,
) -> Vec<Result<Concealed, StegoError>> {
    run_indexed(jobs, profile, |job| conceal(job.cover, &job.params, config))
}

/// `reveal` over many stego images with the same key. Results are in input order.
pub fn reveal_batch(
    images: &[PixelBuffer],
    params: &RevealParams<'_>,
    config: &StegoConfig,
    profile: &ParallelismProfile,
) -> Vec<Result<Revealed, StegoError>> {
    run_indexed(images, profile, |image| reveal(image, params, config))
}
