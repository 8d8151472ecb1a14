// src/dag/render.rs

//! DOT rendering of the job graph.
//!
//! Output is a pure function of the [`JobSet`]: node statements in declared
//! order, then one edge per `depends_on` entry (jobs in declared order, deps
//! in declared order). Edges are not deduplicated.
//!
//! IDs are DOT quoted strings: only `"` and `\` are escaped, everything else
//! (control characters included) is written through unchanged.

use std::io::{self, Write};

use crate::dag::JobSet;

/// Write the DOT graph for `jobs` to `writer`.
pub fn write_graph<W: Write>(jobs: &JobSet, mut writer: W) -> io::Result<()> {
    writeln!(writer, "digraph G {{")?;

    // Nodes
    for job in jobs.iter() {
        writeln!(writer, "  {};", quote(job.name()))?;
    }

    // Edges
    for job in jobs.iter() {
        for dep in job.depends_on() {
            writeln!(writer, "  {} -> {};", quote(dep), quote(job.name()))?;
        }
    }

    writeln!(writer, "}}")?;
    Ok(())
}

fn quote(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 2);
    out.push('"');
    for c in id.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Render the DOT graph for `jobs` into a `String`.
pub fn render(jobs: &JobSet) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec<u8> cannot fail.
    let _ = write_graph(jobs, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::dag::Job;

    fn job(name: &str, deps: &[&str]) -> Job {
        Job::new(
            name,
            deps.iter().map(|d| d.to_string()).collect(),
            Duration::ZERO,
        )
    }

    #[test]
    fn renders_nodes_then_edges() {
        let set = JobSet::new(vec![
            job("foo", &[]),
            job("bar", &[]),
            job("baz", &["foo", "bar"]),
        ])
        .unwrap();

        let expected = "digraph G {\n  \"foo\";\n  \"bar\";\n  \"baz\";\n  \"foo\" -> \"baz\";\n  \"bar\" -> \"baz\";\n}\n";
        assert_eq!(render(&set), expected);
    }

    #[test]
    fn quotes_names_with_special_characters() {
        let set = JobSet::new(vec![job("name?", &[]), job("say \"hi\"", &["name?"])]).unwrap();
        let out = render(&set);
        assert!(out.contains("  \"name?\";\n"));
        assert!(out.contains("  \"name?\" -> \"say \\\"hi\\\"\";\n"));
    }

    #[test]
    fn control_characters_pass_through_unescaped() {
        let set = JobSet::new(vec![job("a\u{7}b", &[]), job("tab\there", &["a\u{7}b"])]).unwrap();
        let out = render(&set);
        assert!(out.contains("  \"a\u{7}b\";\n"));
        assert!(out.contains("  \"a\u{7}b\" -> \"tab\there\";\n"));
        assert!(!out.contains("\\u{7}"));
    }

    #[test]
    fn backslashes_are_escaped() {
        assert_eq!(quote(r"C:\jobs"), r#""C:\\jobs""#);
    }

    #[test]
    fn duplicate_dependencies_produce_duplicate_edges() {
        let set = JobSet::new(vec![job("a", &[]), job("b", &["a", "a"])]).unwrap();
        assert_eq!(render(&set).matches("\"a\" -> \"b\";").count(), 2);
    }
}
