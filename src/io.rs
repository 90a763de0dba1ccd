//! Text-format loaders for map and location files.
//!
//! Three plain-text files describe a problem instance: a node file
//! (`(id, x, y)` entries), an edge file (`(from, to)` entries), and a tags
//! file marking the garage vertex, the companies, and their bus stops. Each
//! file starts with the number of entries that follow.
//!
//! Tags file layout, section by section:
//!
//! ```text
//! 3
//! bus=garage
//! 1
//! 12
//! company=BosH
//! 1
//! 7
//! bus=stop
//! 2
//! 3 5
//! 4 2
//! ```
//!
//! A `bus=stop` section attaches its stops (`vertex workers` pairs) to the
//! most recently declared company.

use std::io::BufRead;

use log::warn;
use thiserror::Error;

use crate::graph::{Graph, VertexId};
use crate::models::Company;

/// Failure while reading a problem file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The underlying reader failed.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    /// A line did not match the expected format.
    #[error("line {line}: malformed entry `{text}`")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// The file ended before the announced entry count was read.
    #[error("file ended before the announced entry count")]
    UnexpectedEof,
}

/// Garage and company registries read from a tags file.
#[derive(Debug, Clone, Default)]
pub struct TagData {
    /// Garage vertex, if the file declares one.
    pub garage: Option<VertexId>,
    /// Companies with their stops, in declaration order.
    pub companies: Vec<Company>,
}

struct Lines<R> {
    reader: R,
    number: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self { reader, number: 0 }
    }

    fn next_line(&mut self) -> Result<Option<String>, LoadError> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.number += 1;
        Ok(Some(buf.trim().to_owned()))
    }

    fn expect_line(&mut self) -> Result<String, LoadError> {
        self.next_line()?.ok_or(LoadError::UnexpectedEof)
    }

    fn malformed(&self, text: &str) -> LoadError {
        LoadError::Malformed {
            line: self.number,
            text: text.to_owned(),
        }
    }

    fn expect_count(&mut self) -> Result<usize, LoadError> {
        let line = self.expect_line()?;
        line.parse().map_err(|_| self.malformed(&line))
    }
}

fn parse_node(text: &str) -> Option<(VertexId, f64, f64)> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let id = parts.next()?.parse().ok()?;
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((id, x, y))
}

fn parse_edge(text: &str) -> Option<(VertexId, VertexId)> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let from = parts.next()?.parse().ok()?;
    let to = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((from, to))
}

/// Loads a road graph from a node file and an edge file.
///
/// With `undirected` set, every edge is inserted in both directions to model
/// two-way roads. Edges naming unknown vertices are skipped with a warning,
/// matching the graph's non-fatal mutation semantics.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use shuttle_routing::io::load_graph;
///
/// let nodes = "2\n(0, 0.0, 0.0)\n(1, 3.0, 4.0)\n";
/// let edges = "1\n(0, 1)\n";
/// let graph = load_graph(Cursor::new(nodes), Cursor::new(edges), true).unwrap();
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.num_edges(), 2);
/// ```
pub fn load_graph<N: BufRead, E: BufRead>(
    nodes: N,
    edges: E,
    undirected: bool,
) -> Result<Graph, LoadError> {
    let mut graph = Graph::new();

    let mut nodes = Lines::new(nodes);
    let node_count = nodes.expect_count()?;
    for _ in 0..node_count {
        let line = nodes.expect_line()?;
        let (id, x, y) = parse_node(&line).ok_or_else(|| nodes.malformed(&line))?;
        if !graph.add_vertex(id, x, y) {
            warn!("duplicate vertex {id} ignored");
        }
    }

    let mut edges = Lines::new(edges);
    let edge_count = edges.expect_count()?;
    for _ in 0..edge_count {
        let line = edges.expect_line()?;
        let (from, to) = parse_edge(&line).ok_or_else(|| edges.malformed(&line))?;
        if !graph.add_edge(from, to) {
            warn!("edge ({from}, {to}) names an unknown vertex, skipped");
            continue;
        }
        if undirected {
            graph.add_edge(to, from);
        }
    }
    Ok(graph)
}

/// Loads the garage vertex and company registry from a tags file.
///
/// Stops declared before any company are skipped with a warning; unknown
/// tags are read and ignored.
pub fn load_tags<R: BufRead>(tags: R) -> Result<TagData, LoadError> {
    let mut lines = Lines::new(tags);
    let mut data = TagData::default();

    let tag_count = lines.expect_count()?;
    for _ in 0..tag_count {
        let tag = lines.expect_line()?;
        let node_count = lines.expect_count()?;
        for _ in 0..node_count {
            let line = lines.expect_line()?;
            if tag.starts_with("bus=garage") {
                let id = line.parse().map_err(|_| lines.malformed(&line))?;
                data.garage = Some(id);
            } else if let Some(name) = tag.strip_prefix("company=") {
                let id = line.parse().map_err(|_| lines.malformed(&line))?;
                data.companies.push(Company::new(name, id));
            } else if tag.starts_with("bus=stop") {
                let mut parts = line.split_whitespace();
                let (Some(vertex), Some(workers), None) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    return Err(lines.malformed(&line));
                };
                let vertex: VertexId = vertex.parse().map_err(|_| lines.malformed(&line))?;
                let workers: u32 = workers.parse().map_err(|_| lines.malformed(&line))?;
                match data.companies.last_mut() {
                    Some(company) => company.set_stop(vertex, workers),
                    None => warn!("stop at vertex {vertex} declared before any company, skipped"),
                }
            } else {
                warn!("unknown tag `{tag}` ignored");
            }
        }
    }
    Ok(data)
}
