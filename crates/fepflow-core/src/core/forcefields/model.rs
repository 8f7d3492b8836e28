use super::get_forcefield;
use crate::core::topology::registry::{TopFiles, TopologyError};
use serde::Serialize;

/// A solvent as the engine sees it: a molecule topology (`itp`) plus an
/// equilibrated solvent box (`coordinates`).
///
/// Water models are solvent models too; see [`GromacsWaterModel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GromacsSolventModel {
    pub identifier: String,
    pub name: String,
    pub itp: String,
    pub coordinates: String,
    pub description: Option<String>,
    pub forcefield: String,
}

pub type GromacsWaterModel = GromacsSolventModel;

impl GromacsSolventModel {
    /// Creates a model whose name, topology and coordinate file names are
    /// derived from the identifier (`tip4p` → `TIP4P`, `tip4p.itp`, `tip4p.gro`).
    pub fn new(identifier: &str, forcefield: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            name: identifier.to_uppercase(),
            itp: guess_filename(identifier, "itp"),
            coordinates: guess_filename(identifier, "gro"),
            description: None,
            forcefield: forcefield.to_string(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
    pub fn itp(mut self, itp: &str) -> Self {
        self.itp = itp.to_string();
        self
    }
    pub fn coordinates(mut self, coordinates: &str) -> Self {
        self.coordinates = coordinates.to_string();
        self
    }
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Checks that both the topology and the coordinate file are bundled,
    /// looking for the topology in the model's own force-field directory.
    pub fn check_files(&self, topfiles: &TopFiles) -> Result<(), TopologyError> {
        let directory = get_forcefield(&self.forcefield).ok().map(|ff| ff.directory);
        self.check_files_in(topfiles, directory)
    }

    /// Like [`check_files`](Self::check_files), but the topology is looked
    /// up in `directory` before falling back to its bare name.
    pub fn check_files_in(
        &self,
        topfiles: &TopFiles,
        directory: Option<&str>,
    ) -> Result<(), TopologyError> {
        topfiles.resolve(&self.itp, directory)?;
        topfiles.path(&self.coordinates)?;
        Ok(())
    }

    /// Path of the topology file, preferring `directory`.
    pub fn itp_path<'a>(
        &self,
        topfiles: &'a TopFiles,
        directory: Option<&str>,
    ) -> Result<&'a std::path::Path, TopologyError> {
        topfiles.resolve(&self.itp, directory)
    }
}

fn guess_filename(identifier: &str, extension: &str) -> String {
    format!("{}.{}", identifier.to_lowercase(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn new_derives_names_from_identifier() {
        let model = GromacsSolventModel::new("TIP3P", "OPLS-AA");
        assert_eq!(model.name, "TIP3P");
        assert_eq!(model.itp, "tip3p.itp");
        assert_eq!(model.coordinates, "tip3p.gro");
        assert!(model.description.is_none());
    }

    #[test]
    fn builder_methods_override_derived_values() {
        let model = GromacsSolventModel::new("octanol", "CHARMM")
            .itp("1oct_charmm.itp")
            .coordinates("1oct_charmm.gro")
            .description("1-octanol");
        assert_eq!(model.name, "OCTANOL");
        assert_eq!(model.itp, "1oct_charmm.itp");
        assert_eq!(model.coordinates, "1oct_charmm.gro");
        assert_eq!(model.description.as_deref(), Some("1-octanol"));
        assert_eq!(model.forcefield, "CHARMM");
    }

    #[test]
    fn check_files_reports_the_first_missing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1oct.itp"), "").unwrap();
        let topfiles = TopFiles::scan(dir.path()).unwrap();

        let model = GromacsSolventModel::new("octanol", "OPLS-AA")
            .itp("1oct.itp")
            .coordinates("1oct.gro");

        assert!(matches!(
            model.check_files(&topfiles),
            Err(TopologyError::MissingFile { name, .. }) if name == "1oct.gro"
        ));

        fs::write(dir.path().join("1oct.gro"), "").unwrap();
        let topfiles = TopFiles::scan(dir.path()).unwrap();
        assert!(model.check_files(&topfiles).is_ok());
    }

    #[test]
    fn topology_is_taken_from_the_requested_forcefield_directory() {
        let dir = tempdir().unwrap();
        for ff in ["amber99sb.ff", "charmm36-mar2019.ff", "oplsaa.ff"] {
            fs::create_dir(dir.path().join(ff)).unwrap();
            fs::write(dir.path().join(ff).join("tip3p.itp"), ff).unwrap();
        }
        fs::write(dir.path().join("spc216.gro"), "").unwrap();
        let topfiles = TopFiles::scan(dir.path()).unwrap();
        let model = GromacsSolventModel::new("tip3p", "OPLS-AA").coordinates("spc216.gro");

        let own = model.itp_path(&topfiles, Some("oplsaa.ff")).unwrap();
        assert!(own.ends_with("oplsaa.ff/tip3p.itp"));
        let charmm = model.itp_path(&topfiles, Some("charmm36-mar2019.ff")).unwrap();
        assert!(charmm.ends_with("charmm36-mar2019.ff/tip3p.itp"));
        assert!(model.check_files_in(&topfiles, Some("charmm36-mar2019.ff")).is_ok());
        assert!(model.check_files(&topfiles).is_ok());
    }
}
