use crate::column::Column;
use crate::error::{BoxError, ColumnError, ColumnResult};
use crate::factory::ColumnFactory;
use crate::parallel;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use vecframe_storage::{Chunk, RawColumn, Storage};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    SingleThreaded,
    /// Partitions are filled on the crate's worker pool when one is available.
    #[default]
    MultiThreaded,
}

/// Materializes a new column by evaluating `func` at every index.
///
/// `func` maps a global row index to `Ok(Some(value))`, `Ok(None)` for a
/// missing value, or an error. It must be a pure function of the index: each
/// partition is filled independently, possibly on another thread, and each
/// index is evaluated exactly once unless materialization is aborted.
///
/// When `func` fails, every partition stops once it passes the lowest failing
/// index seen so far; partitions still below it keep going, so the failure
/// with the lowest index is the one returned. The raw column allocated for the
/// run is dropped, never handed out.
pub struct Frame<'a, F, G> {
    factory: &'a F,
    len: usize,
    master: Option<&'a RawColumn>,
    func: G,
    mode: FillMode,
}

impl<'a, F: ColumnFactory> Frame<'a, F, ()> {
    /// A frame that copies `source` through `factory`, laid out like `source`.
    pub fn for_column<C>(
        factory: &'a F,
        source: &'a C,
    ) -> Frame<'a, F, impl Fn(usize) -> Result<Option<F::Value>, Infallible> + Sync + 'a>
    where
        C: Column<Value = F::Value> + ?Sized,
    {
        Frame {
            factory,
            len: source.len(),
            master: Some(source.vec()),
            func: move |i: usize| Ok::<_, Infallible>(source.get(i)),
            mode: FillMode::default(),
        }
    }
}

struct Failure {
    index: usize,
    source: BoxError,
}

impl<'a, F: ColumnFactory, G> Frame<'a, F, G> {
    pub fn new(factory: &'a F, len: usize, func: G) -> Self {
        Self {
            factory,
            len,
            master: None,
            func,
            mode: FillMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: FillMode) -> Self {
        self.mode = mode;
        self
    }

    /// Allocate, fill, and wrap the new column.
    pub fn new_column<E>(self, storage: &Storage) -> ColumnResult<F::Column>
    where
        G: Fn(usize) -> Result<Option<F::Value>, E> + Sync,
        E: Into<BoxError>,
    {
        let vec = match self.master {
            Some(master) => self.factory.allocate_aligned(storage, master)?,
            None => self.factory.allocate(storage, self.len)?,
        };
        let chunks = vec.chunks();
        log::debug!(
            "materializing {} rows of {} into {} ({} chunks, {:?})",
            self.len,
            self.factory.name(),
            vec.key(),
            chunks.len(),
            self.mode
        );

        let first_failure = AtomicUsize::new(usize::MAX);
        let fill = |chunk: &Chunk| self.fill_chunk::<E>(chunk, &first_failure);
        let outcomes: Vec<Result<(), Failure>> = match self.mode {
            FillMode::MultiThreaded if chunks.len() > 1 => parallel::map_chunks(&chunks, fill),
            _ => chunks.iter().map(fill).collect(),
        };

        if let Some(failure) = outcomes
            .into_iter()
            .filter_map(Result::err)
            .min_by_key(|f| f.index)
        {
            log::warn!(
                "materializing {} failed at index {}: {}",
                vec.key(),
                failure.index,
                failure.source
            );
            return Err(ColumnError::FunctionApplication {
                index: failure.index,
                source: failure.source,
            });
        }

        log::debug!("materialized {}", vec.key());
        self.factory.wrap_column(vec)
    }

    /// `first_failure` holds the lowest index any partition has failed at.
    fn fill_chunk<E>(&self, chunk: &Chunk, first_failure: &AtomicUsize) -> Result<(), Failure>
    where
        G: Fn(usize) -> Result<Option<F::Value>, E>,
        E: Into<BoxError>,
    {
        let typed = self.factory.wrap_partition(chunk);
        let start = chunk.start();
        for index in chunk.range() {
            if index > first_failure.load(Ordering::Relaxed) {
                log::trace!("chunk at {start} abandoned before index {index}");
                return Ok(());
            }
            match (self.func)(index) {
                Ok(value) => typed.set(index - start, value),
                Err(err) => {
                    first_failure.fetch_min(index, Ordering::Relaxed);
                    return Err(Failure {
                        index,
                        source: err.into(),
                    });
                }
            }
        }
        log::trace!("filled chunk {:?}", chunk.range());
        Ok(())
    }
}
