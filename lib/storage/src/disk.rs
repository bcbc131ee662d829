// LMDB-backed registry for durable enrollment
use std::path::Path;

use heed::byteorder::BE;
use heed::types::{Bytes, Str, U64};
use heed::{Database, Env, EnvOpenOptions};
use parking_lot::Mutex;
use tracing::info;

use facematch_core::{Embedding, Error, PersonRecord, RecordId, Registry, Result};

const DB_RECORDS: &str = "records";
const DB_META: &str = "meta";
const META_DIMENSION: &str = "dimension";

/// Records are stored under big-endian sequence keys, so the natural LMDB
/// iteration order is insertion order.
#[derive(Debug)]
pub struct DiskRegistry {
    env: Env,
    records_db: Database<U64<BE>, Bytes>,
    next_id: Mutex<u64>,
    dimension: usize,
}

impl DiskRegistry {
    /// Open (or create) a registry under `path` for embeddings of length
    /// `dimension`.
    ///
    /// The dimension is pinned in a meta table on first open; reopening an
    /// existing registry with a different dimension fails with
    /// [`Error::InvalidConfig`] instead of mixing incomparable embeddings.
    pub fn open<P: AsRef<Path>>(path: P, dimension: usize) -> Result<Self> {
        std::fs::create_dir_all(&path).map_err(storage_err)?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(10 * 1024 * 1024 * 1024) // 10GB default
                .max_dbs(4)
                .open(path)
                .map_err(storage_err)?
        };

        let mut wtxn = env.write_txn().map_err(storage_err)?;

        let records_db: Database<U64<BE>, Bytes> = env
            .create_database(&mut wtxn, Some(DB_RECORDS))
            .map_err(storage_err)?;
        let meta_db: Database<Str, Bytes> = env
            .create_database(&mut wtxn, Some(DB_META))
            .map_err(storage_err)?;

        match meta_db.get(&wtxn, META_DIMENSION).map_err(storage_err)? {
            Some(bytes) => {
                let stored: usize = bincode::deserialize(bytes).map_err(storage_err)?;
                if stored != dimension {
                    return Err(Error::InvalidConfig(format!(
                        "registry was created for {stored}-component embeddings, not {dimension}"
                    )));
                }
            }
            None => {
                let bytes = bincode::serialize(&dimension).map_err(storage_err)?;
                meta_db
                    .put(&mut wtxn, META_DIMENSION, &bytes)
                    .map_err(storage_err)?;
            }
        }

        let next_id = match records_db.last(&wtxn).map_err(storage_err)? {
            Some((key, _)) => key + 1,
            None => 0,
        };

        wtxn.commit().map_err(storage_err)?;

        info!(enrolled = next_id, dimension, "opened disk registry");

        Ok(Self {
            env,
            records_db,
            next_id: Mutex::new(next_id),
            dimension,
        })
    }
}

impl Registry for DiskRegistry {
    fn register(&self, name: &str, external_id: &str, embedding: Embedding) -> Result<RecordId> {
        if embedding.dim() != self.dimension {
            return Err(Error::MalformedEmbedding {
                expected: self.dimension,
                actual: embedding.dim(),
            });
        }

        let record = PersonRecord::new(name, external_id, embedding);
        let bytes = bincode::serialize(&record).map_err(storage_err)?;

        // The guard holds the next sequence number for as long as the
        // transaction lives, so id order is commit order and ids stay
        // dense: a failed commit never burns its number.
        let mut next_id = self.next_id.lock();
        let id = *next_id;

        let mut wtxn = self.env.write_txn().map_err(storage_err)?;
        self.records_db
            .put(&mut wtxn, &id, &bytes)
            .map_err(storage_err)?;
        wtxn.commit().map_err(storage_err)?;

        *next_id = id + 1;
        Ok(RecordId(id))
    }

    fn list_all(&self) -> Result<Vec<PersonRecord>> {
        let rtxn = self.env.read_txn().map_err(storage_err)?;
        let mut records = Vec::new();
        for result in self.records_db.iter(&rtxn).map_err(storage_err)? {
            let (_, bytes) = result.map_err(storage_err)?;
            records.push(bincode::deserialize(bytes).map_err(storage_err)?);
        }
        Ok(records)
    }

    fn count(&self) -> Result<usize> {
        let rtxn = self.env.read_txn().map_err(storage_err)?;
        let len = self.records_db.len(&rtxn).map_err(storage_err)?;
        Ok(len as usize)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn storage_err<E: std::fmt::Display>(err: E) -> Error {
    Error::StorageUnavailable(err.to_string())
}
