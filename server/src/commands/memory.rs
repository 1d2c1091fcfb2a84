use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MemoryUsage {
    pub physical_mem: u64,
    pub virtual_mem: u64,
}

/// `GET /memory`
pub async fn get_memory_usage() -> Json<MemoryUsage> {
    let (physical_mem, virtual_mem) = memory_stats::memory_stats()
        .map(|stats| (stats.physical_mem as u64, stats.virtual_mem as u64))
        .unwrap_or_default();

    Json(MemoryUsage {
        physical_mem,
        virtual_mem,
    })
}
