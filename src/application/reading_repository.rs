// Repository trait for the append-only reading store
use crate::domain::reading::Reading;
use async_trait::async_trait;

#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Full persisted history in insertion order. A store that does not
    /// exist yet is an empty sequence, not an error.
    async fn read_all(&self) -> anyhow::Result<Vec<Reading>>;

    /// Append one reading to the end of the persisted sequence. The store
    /// rewrites the whole file per append; callers must guarantee a single
    /// writer.
    async fn append(&self, reading: Reading) -> anyhow::Result<()>;

    /// Overwrite the entire persisted sequence (bulk regeneration).
    async fn replace_all(&self, readings: &[Reading]) -> anyhow::Result<()>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// In-memory repository for service tests.
    #[derive(Default)]
    pub struct InMemoryRepository {
        readings: Mutex<Vec<Reading>>,
    }

    impl InMemoryRepository {
        pub fn with(readings: Vec<Reading>) -> Self {
            Self {
                readings: Mutex::new(readings),
            }
        }
    }

    #[async_trait]
    impl ReadingRepository for InMemoryRepository {
        async fn read_all(&self) -> anyhow::Result<Vec<Reading>> {
            Ok(self.readings.lock().unwrap().clone())
        }

        async fn append(&self, reading: Reading) -> anyhow::Result<()> {
            self.readings.lock().unwrap().push(reading);
            Ok(())
        }

        async fn replace_all(&self, readings: &[Reading]) -> anyhow::Result<()> {
            *self.readings.lock().unwrap() = readings.to_vec();
            Ok(())
        }
    }
}
