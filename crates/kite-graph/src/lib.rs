//! # kite-graph
//!
//! Cross-referenced entity graphs for TypeScript, JavaScript and Vue packages.
//!
//! Given a package root, kite discovers the source files, extracts their
//! declarations and turns name-based facts into a closed graph of stable ids:
//! packages, modules, classes, interfaces, methods, properties, parameters,
//! functions, type aliases, enums, variables, imports, exports, inheritance
//! edges and resolved member-access references.
//!
//! ## Architecture
//!
//! ```text
//!   Analyzer ──► package.json / lockfile ──► Package + dependency edges
//!      │
//!      ├──► discover ──► sorted file list
//!      │
//!      ├──► run_bounded ──► extract_file × N   (per-file, name-based)
//!      │
//!      └──► aggregate ──► link imports ──► NameIndex
//!                                            ├──► resolve_relationships
//!                                            └──► resolve_symbol_usages
//! ```
//!
//! Extraction is local to one file and never fails the run; a broken file
//! degrades to a bare module record. Resolution happens once, after every
//! file is extracted, and never guesses: a name shared by two candidates
//! stays unresolved and is reported as ambiguous.
//!
//! ## Identity
//!
//! Every id is a version-5 UUID of a per-kind namespace and a composite key
//! (see [`id::keys`]). Two runs over the same files produce the same ids,
//! so results can be upserted repeatedly into a [`sink::GraphSink`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kite_graph::{Analyzer, GraphSink, MemorySink};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let result = Analyzer::new("./my-package").concurrency(4).analyze().await?;
//! println!("{result}");
//!
//! let sink = MemorySink::new();
//! let report = sink.write(&result).await?;
//! println!("{} records stored", report.inserted);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod concurrency;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod extractors;
pub mod id;
pub mod model;
pub mod package_json;
pub mod resolve;
pub mod runtime;
pub mod sink;

pub use analysis::{
    AnalysisResult, AnalysisStats, Analyzer, AnalyzerConfig, DEFAULT_MAX_FILE_SIZE, analyze,
    analyze_with_config,
};
pub use discovery::{DiscoveredFiles, DiscoveryStrategy, discover};
pub use error::{AnalyzeError, Result};
pub use id::{EntityId, EntityKind, generate_id};
pub use package_json::{DependencyMetadata, PackageJson, PackageLock, extract_package_name};
pub use resolve::{ResolutionCounts, ResolutionReport, UsageCounts};
pub use sink::{GraphSink, JsonFileSink, MemorySink, SinkError, WriteReport};

// Re-export runtime types
pub use runtime::{FileMetadata, NativeRuntime, Runtime, RuntimeError, RuntimeResult};

#[cfg(any(test, feature = "test-utils"))]
pub use runtime::test_utils::TestRuntime;

// Re-export OXC foundation types so consumers parse with the same version
pub mod oxc {
    //! OXC types used by the extractors, re-exported for version consistency.

    /// Arena allocator for AST nodes
    pub use oxc_allocator::Allocator;

    pub use oxc_span::{GetSpan, SourceType, Span};

    /// AST node types
    pub use oxc_ast::ast;

    pub use oxc_ast_visit::Visit;

    pub use oxc_parser::{Parser, ParserReturn};
}

#[cfg(test)]
mod tests;
