//! All-or-nothing invocation boundary.

/// A host whose state can be checkpointed and rolled back.
pub trait Journaled {
    type Checkpoint;

    fn checkpoint(&mut self) -> Self::Checkpoint;

    /// Discard every change made since `checkpoint` was taken.
    fn revert_to(&mut self, checkpoint: Self::Checkpoint);

    /// Keep every change made since `checkpoint` was taken.
    fn commit(&mut self, checkpoint: Self::Checkpoint);
}

/// Run `f` so that either all of its effects on `host` commit or none do.
pub fn run_atomic<H, T, E, F>(host: &mut H, f: F) -> Result<T, E>
where
    H: Journaled,
    E: std::fmt::Display,
    F: FnOnce(&mut H) -> Result<T, E>,
{
    let checkpoint = host.checkpoint();
    match f(host) {
        Ok(value) => {
            host.commit(checkpoint);
            Ok(value)
        }
        Err(e) => {
            tracing::debug!(error = %e, "invocation aborted, reverting");
            host.revert_to(checkpoint);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        entries: Vec<u32>,
        commits: usize,
    }

    impl Journaled for Log {
        type Checkpoint = usize;

        fn checkpoint(&mut self) -> usize {
            self.entries.len()
        }

        fn revert_to(&mut self, checkpoint: usize) {
            self.entries.truncate(checkpoint);
        }

        fn commit(&mut self, _checkpoint: usize) {
            self.commits += 1;
        }
    }

    #[test]
    fn success_keeps_effects() {
        let mut log = Log::default();
        let out: Result<u32, String> = run_atomic(&mut log, |l| {
            l.entries.push(1);
            l.entries.push(2);
            Ok(7)
        });
        assert_eq!(out, Ok(7));
        assert_eq!(log.entries, vec![1, 2]);
        assert_eq!(log.commits, 1);
    }

    #[test]
    fn failure_discards_partial_effects() {
        let mut log = Log::default();
        log.entries.push(9);
        let out: Result<(), String> = run_atomic(&mut log, |l| {
            l.entries.push(1);
            Err("boom".to_string())
        });
        assert!(out.is_err());
        assert_eq!(log.entries, vec![9]);
        assert_eq!(log.commits, 0);
    }
}
