//! Ctrl-C routing outside the line editor.
//!
//! rustyline reads Ctrl-C as a key while it owns the terminal, so SIGINT
//! only arrives while the client is busy. Tokio keeps its handler installed
//! for the rest of the process once it starts listening, so one listener
//! lives for the whole run: it cancels the active reply when there is one
//! and exits otherwise.

use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

/// Exit status of a process stopped by SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, Default)]
pub struct InterruptRouter {
    active: Arc<Mutex<Option<CancellationToken>>>,
}

impl InterruptRouter {
    /// Starts the process-wide listener.
    pub fn install() -> Self {
        let router = Self::default();
        tokio::spawn({
            let router = router.clone();
            async move {
                while tokio::signal::ctrl_c().await.is_ok() {
                    if !router.interrupt() {
                        tracing::info!("interrupted while busy, exiting");
                        println!();
                        std::process::exit(INTERRUPTED_EXIT_CODE);
                    }
                }
            }
        });
        router
    }

    /// Routes Ctrl-C to a fresh token until the returned guard is dropped.
    pub fn arm(&self) -> ArmedInterrupt {
        let token = CancellationToken::new();
        *self.lock() = Some(token.clone());
        ArmedInterrupt {
            router: self.clone(),
            token,
        }
    }

    /// Cancels the armed token. Returns `false` when nothing is armed.
    fn interrupt(&self) -> bool {
        match self.lock().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds Ctrl-C for one reply. Dropping it hands Ctrl-C back to the exit path.
pub struct ArmedInterrupt {
    router: InterruptRouter,
    token: CancellationToken,
}

impl ArmedInterrupt {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for ArmedInterrupt {
    fn drop(&mut self) {
        *self.router.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_cancels_armed_token() {
        let router = InterruptRouter::default();
        let armed = router.arm();

        assert!(router.interrupt());
        assert!(armed.token().is_cancelled());
    }

    #[test]
    fn test_dropping_guard_disarms() {
        let router = InterruptRouter::default();
        let token = {
            let armed = router.arm();
            armed.token().clone()
        };

        assert!(!router.interrupt());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_each_arm_gets_a_fresh_token() {
        let router = InterruptRouter::default();
        let first = router.arm().token().clone();
        let second = router.arm();

        assert!(router.interrupt());
        assert!(second.token().is_cancelled());
        assert!(!first.is_cancelled());
    }
}
