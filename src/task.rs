/// One unit of work in a hive's round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    /// The employed bee of source `n` explores near it.
    Employed(usize),
    /// The `n`th onlooker picks a source by weight. The index only drives the
    /// cycle; the source is chosen when the task runs.
    Onlooker(usize),
    /// Scouts abandon every expired source.
    Scout,
}

/// Yields the hive's schedule: every employed bee in order, then every
/// onlooker, then the scouts, once per round.
pub struct TaskGenerator {
    sources: usize,
    next: Task,
    max_rounds: Option<usize>,
    stopped: bool,
    pub round: usize,
}

impl TaskGenerator {
    pub fn new(sources: usize) -> TaskGenerator {
        TaskGenerator {
            sources,
            round: 0,
            max_rounds: None,
            next: Task::Employed(0),
            stopped: sources == 0,
        }
    }

    pub fn max_rounds(mut self, max_rounds: usize) -> TaskGenerator {
        self.max_rounds = Some(max_rounds);
        self.stopped = self.stopped || max_rounds == 0;
        self
    }

    /// Ends the schedule. Called between rounds, this takes effect
    /// immediately; mid-round, the remaining tasks are dropped.
    pub fn stop(&mut self) {
        self.stopped = true;
    }
}

impl Iterator for TaskGenerator {
    type Item = Task;
    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped {
            return None;
        }
        let current = self.next.clone();
        self.next = match self.next {
            Task::Employed(n) if n == self.sources - 1 => Task::Onlooker(0),
            Task::Employed(n) => Task::Employed(n + 1),
            Task::Onlooker(n) if n == self.sources - 1 => Task::Scout,
            Task::Onlooker(n) => Task::Onlooker(n + 1),
            Task::Scout => {
                self.round += 1;
                if let Some(max) = self.max_rounds {
                    if self.round >= max {
                        self.stopped = true;
                    }
                }
                Task::Employed(0)
            }
        };
        Some(current)
    }
}
