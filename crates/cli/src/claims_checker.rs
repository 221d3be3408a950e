//! Bundled claims checker
//!
//! The reference collaborator the standalone binary binds to the harness.
//! It behaves like any small file-oriented lint CLI: reads the claims file
//! named in argv[1], prints one line per claim, warns about claims that do
//! not end with a period, writes a ".marked" companion copy of its input,
//! and terminates the process on missing or empty input. The harness itself
//! runs any `ToolEntryPoint`; nothing in claimrun-core depends on this one.

use std::io::Write;
use std::path::{Path, PathBuf};

use claimrun_core::port::tool_entry::{ToolContext, ToolEntryPoint, ToolError};

pub struct BasicClaimsChecker;

impl ToolEntryPoint for BasicClaimsChecker {
    fn run(&self, ctx: &mut ToolContext<'_>) -> Result<(), ToolError> {
        let argv = ctx.argv().to_vec();
        if argv.len() < 2 {
            let program = argv.first().map(String::as_str).unwrap_or("claims-checker");
            writeln!(ctx.stderr(), "usage: {} CLAIMS_FILE [--quiet]", program)?;
            ctx.exit(2);
        }

        let claims_path = PathBuf::from(&argv[1]);
        let quiet = argv.iter().skip(2).any(|arg| arg == "--quiet");

        if !ctx.fs().is_file(&claims_path) {
            writeln!(
                ctx.stderr(),
                "claims file not found: {}",
                claims_path.display()
            )?;
            ctx.exit(1);
        }

        let text = ctx.fs().read_to_string(&claims_path)?;
        let claims: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if claims.is_empty() {
            writeln!(
                ctx.stderr(),
                "no claims found in {}",
                claims_path.display()
            )?;
            ctx.exit(1);
        }

        let mut warnings = 0usize;
        for (idx, claim) in claims.iter().enumerate() {
            let number = idx + 1;
            if !quiet {
                writeln!(
                    ctx.stdout(),
                    "claim {}: {} words",
                    number,
                    claim.split_whitespace().count()
                )?;
            }
            if !claim.ends_with('.') {
                warnings += 1;
                writeln!(
                    ctx.stderr(),
                    "warning: claim {} does not end with a period",
                    number
                )?;
            }
        }

        // Companion copy of the checked input.
        let marked_path = marked_path_for(&claims_path);
        let mut marked = ctx.fs().open_write(&marked_path)?;
        writeln!(marked, "# checked by claims-checker")?;
        marked.write_all(text.as_bytes())?;

        writeln!(
            ctx.stdout(),
            "{} claims checked, {} warnings",
            claims.len(),
            warnings
        )?;
        Ok(())
    }
}

fn marked_path_for(claims_path: &Path) -> PathBuf {
    let mut os = claims_path.as_os_str().to_os_string();
    os.push(".marked");
    PathBuf::from(os)
}
