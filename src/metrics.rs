use std::sync::atomic::{AtomicU64, Ordering};

/// Per-operation request counters shared by all handlers.
#[derive(Default)]
pub struct TodoMetrics {
    pub list_total: AtomicU64,
    pub get_total: AtomicU64,
    pub create_total: AtomicU64,
    pub update_total: AtomicU64,
    pub delete_total: AtomicU64,
    pub not_found_total: AtomicU64,
}

#[derive(Debug, Clone, Copy)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl TodoMetrics {
    pub fn inc(&self, op: Op) {
        let counter = match op {
            Op::List => &self.list_total,
            Op::Get => &self.get_total,
            Op::Create => &self.create_total,
            Op::Update => &self.update_total,
            Op::Delete => &self.delete_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_not_found(&self) {
        self.not_found_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Serialize to Prometheus text exposition format.
    pub fn to_prometheus_text(&self) -> String {
        let list = self.list_total.load(Ordering::Relaxed);
        let get = self.get_total.load(Ordering::Relaxed);
        let create = self.create_total.load(Ordering::Relaxed);
        let update = self.update_total.load(Ordering::Relaxed);
        let delete = self.delete_total.load(Ordering::Relaxed);
        let not_found = self.not_found_total.load(Ordering::Relaxed);

        format!(
            "# HELP todo_api_requests_total Todo requests handled, by operation\n\
             # TYPE todo_api_requests_total counter\n\
             todo_api_requests_total{{op=\"list\"}} {list}\n\
             todo_api_requests_total{{op=\"get\"}} {get}\n\
             todo_api_requests_total{{op=\"create\"}} {create}\n\
             todo_api_requests_total{{op=\"update\"}} {update}\n\
             todo_api_requests_total{{op=\"delete\"}} {delete}\n\
             # HELP todo_api_not_found_total Lookups by id that matched no row\n\
             # TYPE todo_api_not_found_total counter\n\
             todo_api_not_found_total {not_found}\n"
        )
    }
}
