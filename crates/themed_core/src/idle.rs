//! Idle task queue
//!
//! Work deferred to the next idle point of the single-threaded event loop.
//! Every scheduled task gets a [`TaskId`] that can cancel it until it runs.
//! Coalescing is done by callers: cancel the previous handle, schedule anew.

use std::collections::VecDeque;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle of a scheduled idle task
    pub struct TaskId;
}

/// A deferred callback receiving the loop context
pub type IdleTask<C> = Box<dyn FnOnce(&mut C)>;

/// FIFO queue of cancellable idle tasks
pub struct IdleQueue<C> {
    tasks: SlotMap<TaskId, IdleTask<C>>,
    order: VecDeque<TaskId>,
}

impl<C> IdleQueue<C> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            order: VecDeque::new(),
        }
    }

    /// Schedule a task for the next idle point
    pub fn schedule<F>(&mut self, task: F) -> TaskId
    where
        F: FnOnce(&mut C) + 'static,
    {
        let id = self.tasks.insert(Box::new(task));
        self.order.push_back(id);
        id
    }

    /// Cancel a task that has not run yet
    ///
    /// Returns false when the task already ran or was cancelled before.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if self.tasks.remove(id).is_none() {
            return false;
        }
        self.order.retain(|queued| *queued != id);
        true
    }

    /// Whether the task is still waiting to run
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Number of tasks waiting to run
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Take the next runnable task, skipping cancelled ones
    ///
    /// The task is removed before it runs, so cancelling its own handle from
    /// inside the task is a harmless no-op.
    pub fn pop(&mut self) -> Option<(TaskId, IdleTask<C>)> {
        while let Some(id) = self.order.pop_front() {
            if let Some(task) = self.tasks.remove(id) {
                return Some((id, task));
            }
        }
        None
    }

    /// Drop all pending tasks without running them
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.order.clear();
    }
}

impl<C> Default for IdleQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut IdleQueue<Vec<u32>>, log: &mut Vec<u32>) -> usize {
        let mut ran = 0;
        while let Some((_, task)) = queue.pop() {
            task(log);
            ran += 1;
        }
        ran
    }

    #[test]
    fn test_runs_in_fifo_order() {
        let mut queue = IdleQueue::new();
        queue.schedule(|log: &mut Vec<u32>| log.push(1));
        queue.schedule(|log: &mut Vec<u32>| log.push(2));

        let mut log = Vec::new();
        assert_eq!(drain(&mut queue, &mut log), 2);
        assert_eq!(log, vec![1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancelled_task_never_runs() {
        let mut queue = IdleQueue::new();
        let first = queue.schedule(|log: &mut Vec<u32>| log.push(1));
        let second = queue.schedule(|log: &mut Vec<u32>| log.push(2));

        assert!(queue.cancel(first));
        assert!(!queue.cancel(first));
        assert!(!queue.is_pending(first));
        assert!(queue.is_pending(second));

        let mut log = Vec::new();
        assert_eq!(drain(&mut queue, &mut log), 1);
        assert_eq!(log, vec![2]);
        assert!(!queue.cancel(second));
    }

    #[test]
    fn test_cancel_and_reschedule_coalesces() {
        let mut queue = IdleQueue::new();
        let mut pending: Option<TaskId> = None;
        for i in 0..5 {
            if let Some(id) = pending.take() {
                queue.cancel(id);
            }
            pending = Some(queue.schedule(move |log: &mut Vec<u32>| log.push(i)));
        }

        assert_eq!(queue.len(), 1);
        let mut log = Vec::new();
        drain(&mut queue, &mut log);
        assert_eq!(log, vec![4]);
    }

    #[test]
    fn test_cancel_leaves_no_stale_order_entries() {
        let mut queue = IdleQueue::new();
        let keep = queue.schedule(|log: &mut Vec<u32>| log.push(0));
        let mut pending = queue.schedule(|log: &mut Vec<u32>| log.push(1));
        for i in 2..50 {
            queue.cancel(pending);
            pending = queue.schedule(move |log: &mut Vec<u32>| log.push(i));
        }

        assert_eq!(queue.order.len(), 2);
        assert_eq!(queue.order.iter().copied().collect::<Vec<_>>(), vec![keep, pending]);

        let mut log = Vec::new();
        assert_eq!(drain(&mut queue, &mut log), 2);
        assert_eq!(log, vec![0, 49]);
        assert!(queue.order.is_empty());
    }
}
