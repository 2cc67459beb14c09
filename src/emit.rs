//! Flat tab-separated output of a converged relation
//!
//! All writers emit vertices in ascending id order. The path-taking variants
//! create or truncate the file; refusing to overwrite an existing file is
//! the caller's job (see `config::RunConfig::preflight`).

use crate::error::{ReachError, Result};
use crate::graph::EdgeIndex;
use crate::reach::{QueryAnswers, ReachabilityStore};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `<source>\t<target>` for every pair in the store
pub fn write_pairs<W: Write>(out: &mut W, index: &EdgeIndex, store: &ReachabilityStore) -> std::io::Result<usize> {
    let mut lines = 0;
    for (vertex, target) in store.pairs() {
        writeln!(out, "{}\t{}", index.vertex_id(vertex), index.vertex_id(target))?;
        lines += 1;
    }
    Ok(lines)
}

/// Write `<vertex>\t<degree>` for every vertex with a non-empty set
pub fn write_degrees<W: Write>(out: &mut W, index: &EdgeIndex, store: &ReachabilityStore) -> std::io::Result<usize> {
    let mut lines = 0;
    for vertex in 0..store.vertex_count() {
        let size = store.size(vertex);
        if size > 0 {
            writeln!(out, "{}\t{}", index.vertex_id(vertex), size)?;
            lines += 1;
        }
    }
    Ok(lines)
}

/// Write `<source>\t<target>\t<light|heavy>` for every query answer
pub fn write_answers<W: Write>(out: &mut W, index: &EdgeIndex, answers: &QueryAnswers) -> std::io::Result<usize> {
    let mut lines = 0;
    for (source, class, target) in answers.iter() {
        writeln!(
            out,
            "{}\t{}\t{}",
            index.vertex_id(source),
            index.vertex_id(target),
            class.name()
        )?;
        lines += 1;
    }
    Ok(lines)
}

/// Emit the relation to `path`, returning the number of lines written
pub fn emit_pairs(path: &Path, index: &EdgeIndex, store: &ReachabilityStore) -> Result<usize> {
    let lines = write_to(path, |out| write_pairs(out, index, store))?;
    tracing::info!(path = %path.display(), lines, "wrote reachable pairs");
    Ok(lines)
}

/// Emit per-vertex degrees to `path`
pub fn emit_degrees(path: &Path, index: &EdgeIndex, store: &ReachabilityStore) -> Result<usize> {
    let lines = write_to(path, |out| write_degrees(out, index, store))?;
    tracing::info!(path = %path.display(), lines, "wrote degrees");
    Ok(lines)
}

/// Emit query answers to `path`
pub fn emit_answers(path: &Path, index: &EdgeIndex, answers: &QueryAnswers) -> Result<usize> {
    let lines = write_to(path, |out| write_answers(out, index, answers))?;
    tracing::info!(path = %path.display(), lines, "wrote query answers");
    Ok(lines)
}

fn write_to<F>(path: &Path, body: F) -> Result<usize>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<usize>,
{
    let file = File::create(path).map_err(|e| ReachError::io(path, e))?;
    let mut out = BufWriter::new(file);
    let written = body(&mut out).and_then(|lines| out.flush().map(|()| lines));
    written.map_err(|e| {
        drop(out);
        discard(path);
        ReachError::io(path, e)
    })
}

/// Remove an output file this run created
pub fn discard(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        tracing::warn!(path = %path.display(), %err, "could not remove incomplete output");
    } else {
        tracing::debug!(path = %path.display(), "removed incomplete output");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reach::test_utils::index;
    use crate::reach::{answer_queries, compute, ReachOptions};

    #[test]
    fn test_pairs_format() {
        let idx = index("1 2 2\n2 3 3\n");
        let fix = compute(&idx, &ReachOptions::new(5));
        let mut buf = Vec::new();
        let lines = write_pairs(&mut buf, &idx, &fix.store).unwrap();
        assert_eq!(lines, 2);
        assert_eq!(String::from_utf8(buf).unwrap(), "1\t3\n2\t3\n");
    }

    #[test]
    fn test_degrees_skip_empty_vertices() {
        let idx = index("1 2 2\n2 3 3\n2 3 4\n");
        let fix = compute(&idx, &ReachOptions::new(5));
        let mut buf = Vec::new();
        write_degrees(&mut buf, &idx, &fix.store).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1\t2\n2\t2\n");
    }

    #[test]
    fn test_answers_format() {
        let idx = index("0 1 5\n5 3 7\n");
        let fix = compute(&idx, &ReachOptions::new(2));
        let answers = answer_queries(&idx, &fix.store);
        let mut buf = Vec::new();
        write_answers(&mut buf, &idx, &answers).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0\t7\tlight\n");
    }

    #[test]
    fn test_emit_pairs_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let idx = index("1 3 2\n");
        let fix = compute(&idx, &ReachOptions::new(1));
        assert_eq!(emit_pairs(&path, &idx, &fix.store).unwrap(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\t2\n");
    }

    #[test]
    fn test_emit_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.tsv");
        let idx = index("1 3 2\n");
        let fix = compute(&idx, &ReachOptions::new(1));
        let err = emit_pairs(&path, &idx, &fix.store).unwrap_err();
        assert!(matches!(err, ReachError::Io { .. }));
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let result = write_to(&path, |out| {
            writeln!(out, "1\t2")?;
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        });
        assert!(matches!(result, Err(ReachError::Io { .. })));
        assert!(!path.exists());
    }
}
