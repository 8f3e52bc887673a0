//! Env-gated Graphviz dumps of the break graph.
//!
//! Set `MORAY_DUMP_GRAPHS` to an integer level (higher is chattier; parsed
//! once per process) to write numbered `.dot` files into `MORAY_DUMP_DIR`
//! (default: current directory). Dump failures are ignored; dumps are a
//! debugging aid, never part of the result.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use moray_graph::{dot, Graph, VertexInfo};
use tracing::debug;

use crate::acyclic::{BreakEdge, BreakVertex};

fn graphs_level() -> u32 {
    static LEVEL: OnceLock<u32> = OnceLock::new();
    *LEVEL.get_or_init(|| {
        std::env::var("MORAY_DUMP_GRAPHS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    })
}

static DUMP_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Dump the break graph when the configured level reaches `level`.
///
/// Break vertices show their origin's name and display color; edges that may
/// still be cut (or were cut) render yellow.
pub(crate) fn dump_if<N, E>(
    level: u32,
    brk: &Graph<BreakVertex, BreakEdge>,
    orig: &Graph<N, E>,
    suffix: &str,
) where
    N: VertexInfo,
{
    if graphs_level() < level {
        return;
    }
    let seq = DUMP_SEQ.fetch_add(1, Ordering::Relaxed) + 1;
    let dir = std::env::var_os("MORAY_DUMP_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(format!("moray_{seq:03}_{suffix}.dot"));
    let Ok(file) = File::create(&path) else {
        return;
    };
    let mut writer = BufWriter::new(file);
    let _ = dot::write_dot(
        brk,
        &mut writer,
        suffix,
        |_, label: &BreakVertex| {
            let origin = orig.label(label.origin);
            format!(
                "label=\"{}\" color=\"{}\"",
                dot::escape(&origin.name()),
                origin.dot_color()
            )
        },
        |er| {
            let color = if er.cut() || er.cutable() {
                "yellow"
            } else {
                "black"
            };
            format!("label=\"w{}\" color=\"{color}\"", er.weight())
        },
    );
    debug!("wrote {}", path.display());
}
