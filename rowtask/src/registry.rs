use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::{RowMetricsProvider, SchedulerError, Task};

/// One registered row and its scheduling flags.
pub struct RowRecord<P, M: RowMetricsProvider> {
    pub(crate) index: usize,
    pub(crate) payload: P,
    pub(crate) tasks: Vec<Task<P, M>>,
    pub(crate) is_processed: bool,
    pub(crate) is_out_of_view: bool,
    pub(crate) is_active: bool,
    pub(crate) generation: u64,
}

impl<P, M: RowMetricsProvider> RowRecord<P, M> {
    pub(crate) fn new(index: usize, payload: P) -> Self {
        Self {
            index,
            payload,
            tasks: Vec::new(),
            is_processed: false,
            is_out_of_view: false,
            is_active: false,
            generation: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn tasks(&self) -> &[Task<P, M>] {
        &self.tasks
    }

    pub fn task(&self, key: &str) -> Option<&Task<P, M>> {
        self.tasks.iter().find(|t| t.key == key)
    }

    /// The row entered the window (its executes are queued or done) and has not left since.
    pub fn is_processed(&self) -> bool {
        self.is_processed
    }

    pub fn is_out_of_view(&self) -> bool {
        self.is_out_of_view
    }

    /// The executes of this row ran and their cleanups have not run yet.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Merges `tasks` by key: a known key swaps in the new `execute` and keeps the old cleanup
    /// and position, an unknown key is appended.
    pub(crate) fn merge_tasks(&mut self, tasks: impl IntoIterator<Item = Task<P, M>>) {
        for task in tasks {
            match self.tasks.iter_mut().find(|t| t.key == task.key) {
                Some(existing) => existing.execute = task.execute,
                None => self.tasks.push(task),
            }
        }
    }

    pub(crate) fn remove_task(&mut self, key: &str) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.key == key) else {
            return false;
        };
        self.tasks.remove(pos);
        true
    }
}

impl<P: core::fmt::Debug, M: RowMetricsProvider> core::fmt::Debug for RowRecord<P, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RowRecord")
            .field("index", &self.index)
            .field("payload", &self.payload)
            .field("tasks", &self.tasks)
            .field("is_processed", &self.is_processed)
            .field("is_out_of_view", &self.is_out_of_view)
            .field("is_active", &self.is_active)
            .field("generation", &self.generation)
            .finish()
    }
}

/// Index-ordered storage of row records.
pub(crate) struct Registry<P, M: RowMetricsProvider> {
    rows: BTreeMap<usize, RowRecord<P, M>>,
}

impl<P, M: RowMetricsProvider> Registry<P, M> {
    pub(crate) fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, record: RowRecord<P, M>) -> Option<RowRecord<P, M>> {
        self.rows.insert(record.index, record)
    }

    pub(crate) fn get(&self, index: usize) -> Option<&RowRecord<P, M>> {
        self.rows.get(&index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut RowRecord<P, M>> {
        self.rows.get_mut(&index)
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn clear(&mut self) {
        self.rows.clear();
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &RowRecord<P, M>> {
        self.rows.values()
    }

    /// Binary search over `0..len` only works when the registered indexes are exactly that.
    /// Keys are unique and sorted, so checking both ends is enough.
    pub(crate) fn check_contiguous(&self) -> Result<(), SchedulerError> {
        let (Some((&first, _)), Some((&last, _))) =
            (self.rows.first_key_value(), self.rows.last_key_value())
        else {
            return Ok(());
        };
        let len = self.rows.len();
        if first == 0 && last + 1 == len {
            Ok(())
        } else {
            Err(SchedulerError::SparseRows { len, last })
        }
    }
}
