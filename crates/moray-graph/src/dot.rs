//! Graphviz dot output.
//!
//! Attribute closures keep the writer reusable: callers decide how vertices
//! and edges are labeled and colored.

use std::io::{self, Write};

use crate::{EdgeRef, Graph, VertexId};

/// Escape a string for use inside a double-quoted dot attribute.
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Write `g` in dot format. Removed vertices and edges are skipped.
///
/// `vertex_attrs` and `edge_attrs` return raw attribute lists, e.g.
/// `label="a" color="black"`.
pub fn write_dot<N, E, W, VF, EF>(
    g: &Graph<N, E>,
    w: &mut W,
    name: &str,
    mut vertex_attrs: VF,
    mut edge_attrs: EF,
) -> io::Result<()>
where
    W: Write,
    VF: FnMut(VertexId, &N) -> String,
    EF: FnMut(EdgeRef<'_, E>) -> String,
{
    writeln!(w, "digraph {name} {{")?;
    for v in g.vertex_ids() {
        writeln!(w, "  v{} [{}];", v.index(), vertex_attrs(v, g.label(v)))?;
    }
    for e in g.edge_ids() {
        let er = g.edge(e);
        writeln!(
            w,
            "  v{} -> v{} [{}];",
            er.from().index(),
            er.to().index(),
            edge_attrs(er)
        )?;
    }
    writeln!(w, "}}")
}
