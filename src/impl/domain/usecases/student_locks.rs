use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::entities::StudentId;

/// Keyed mutual exclusion: one async mutex per student, created on first use.
/// The read-obligations → allocate → write-entries → recompute sequence for a
/// student runs entirely inside its lock; operations on different students
/// proceed in parallel.
pub(crate) struct StudentLocks {
    locks: Mutex<HashMap<StudentId, Arc<AsyncMutex<()>>>>,
}

impl StudentLocks {
    pub(crate) fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) async fn acquire(&self, student_id: &StudentId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .expect("student lock registry poisoned");
            locks
                .entry(student_id.clone())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::student;

    #[tokio::test]
    async fn same_student_is_serialized() {
        let locks = Arc::new(StudentLocks::new());
        let guard = locks.acquire(&student("alice")).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&student("alice")).await;
            })
        };
        // The contender cannot finish while the first guard is held.
        tokio::task::yield_now().await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn different_students_do_not_contend() {
        let locks = StudentLocks::new();
        let _alice = locks.acquire(&student("alice")).await;
        // Completes immediately despite alice's guard being held.
        let _bob = locks.acquire(&student("bob")).await;
    }
}
