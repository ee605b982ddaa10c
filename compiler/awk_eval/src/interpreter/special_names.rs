//! Names of the standard variables, built once per interpreter.

use awk_ir::Name;

/// Pre-built `Name`s for the variables the runtime reads and writes on
/// every record.
#[derive(Clone, Debug)]
pub(crate) struct SpecialNames {
    pub(crate) argc: Name,
    pub(crate) argv: Name,
    pub(crate) environ: Name,
    pub(crate) filename: Name,
    pub(crate) fnr: Name,
    pub(crate) fs: Name,
    pub(crate) nf: Name,
    pub(crate) nr: Name,
    pub(crate) ofmt: Name,
    pub(crate) ofs: Name,
    pub(crate) ors: Name,
    pub(crate) rlength: Name,
    pub(crate) rs: Name,
    pub(crate) rstart: Name,
    pub(crate) subsep: Name,
}

impl SpecialNames {
    pub(crate) fn new() -> Self {
        SpecialNames {
            argc: Name::new("ARGC"),
            argv: Name::new("ARGV"),
            environ: Name::new("ENVIRON"),
            filename: Name::new("FILENAME"),
            fnr: Name::new("FNR"),
            fs: Name::new("FS"),
            nf: Name::new("NF"),
            nr: Name::new("NR"),
            ofmt: Name::new("OFMT"),
            ofs: Name::new("OFS"),
            ors: Name::new("ORS"),
            rlength: Name::new("RLENGTH"),
            rs: Name::new("RS"),
            rstart: Name::new("RSTART"),
            subsep: Name::new("SUBSEP"),
        }
    }
}
