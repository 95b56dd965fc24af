/*! Corpus discovery

Finds relANNIS table files below a root folder and groups them by parent folder.
Files that are not one of the five tables (`resolver_vis_map.annis`, ...) are ignored.
!*/
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Error;
use crate::tables::{Table, TableSources};

/// Table files of a single corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFiles {
    name: String,
    dir: PathBuf,
    tables: HashMap<Table, PathBuf>,
}

impl CorpusFiles {
    pub fn new(name: String, dir: PathBuf) -> Self {
        Self {
            name,
            dir,
            tables: HashMap::new(),
        }
    }

    /// Corpus name, derived from its path relative to the discovery root.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn insert(&mut self, table: Table, path: PathBuf) {
        self.tables.insert(table, path);
    }

    fn read_table(&self, table: Table) -> Result<String, Error> {
        let path = self.tables.get(&table).ok_or_else(|| Error::MissingTable {
            corpus: self.dir.clone(),
            table,
        })?;
        debug!("reading {:?}", path);
        Ok(std::fs::read_to_string(path)?)
    }

    /// Read the content of all five tables.
    pub fn read(&self) -> Result<TableSources, Error> {
        Ok(TableSources {
            node: self.read_table(Table::Node)?,
            node_annotation: self.read_table(Table::NodeAnnotation)?,
            corpus: self.read_table(Table::Corpus)?,
            corpus_annotation: self.read_table(Table::CorpusAnnotation)?,
            text: self.read_table(Table::Text)?,
        })
    }
}

/// Name a corpus after its folder path relative to `root`.
fn corpus_name(root: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.is_empty() {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "corpus".to_string())
    } else {
        parts.join("_")
    }
}

/// Give a numbered suffix to corpora whose name is already taken.
///
/// Names are output file names, so they must be unique.
fn dedup_names(corpora: &mut [CorpusFiles]) {
    let mut taken: HashSet<String> = HashSet::with_capacity(corpora.len());
    for corpus in corpora.iter_mut() {
        if taken.contains(&corpus.name) {
            let name = (2..)
                .map(|n| format!("{}_{}", corpus.name, n))
                .find(|name| !taken.contains(name))
                .unwrap_or_else(|| corpus.name.clone());
            warn!(
                "corpus name {} already used, renaming {:?} to {}",
                corpus.name, corpus.dir, name
            );
            corpus.name = name;
        }
        taken.insert(corpus.name.clone());
    }
}

/// Find every corpus below `root`.
///
/// Corpora are returned in path order, with unique names.
pub fn discover(root: &Path) -> Result<Vec<CorpusFiles>, Error> {
    let root_str = root
        .to_str()
        .ok_or_else(|| Error::Custom(format!("non UTF-8 path: {:?}", root)))?;
    let pattern = format!("{}/**/*.annis", glob::Pattern::escape(root_str));

    let mut corpora: BTreeMap<PathBuf, CorpusFiles> = BTreeMap::new();
    for path in glob::glob(&pattern)? {
        let path = path?;
        let table = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(Table::from_file_name);
        let (table, dir) = match (table, path.parent()) {
            (Some(table), Some(dir)) => (table, dir.to_path_buf()),
            _ => {
                debug!("skipping {:?}", path);
                continue;
            }
        };

        corpora
            .entry(dir.clone())
            .or_insert_with(|| CorpusFiles::new(corpus_name(root, &dir), dir))
            .insert(table, path);
    }

    if corpora.is_empty() {
        warn!("no relANNIS corpus found in {:?}", root);
    }
    let mut corpora: Vec<CorpusFiles> = corpora.into_values().collect();
    dedup_names(&mut corpora);
    Ok(corpora)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch_corpus(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        for table in Table::ALL {
            fs::write(dir.join(table.file_name()), "").unwrap();
        }
    }

    #[test]
    fn discover_nested() {
        let root = tempfile::tempdir().unwrap();
        touch_corpus(&root.path().join("ddd/benediktiner"));
        touch_corpus(&root.path().join("ref/14_2-ofr"));
        fs::write(root.path().join("ref/14_2-ofr/resolver_vis_map.annis"), "").unwrap();
        fs::write(root.path().join("README"), "").unwrap();

        let corpora = discover(root.path()).unwrap();
        let names: Vec<&str> = corpora.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["ddd_benediktiner", "ref_14_2-ofr"]);
        assert!(corpora.iter().all(|c| c.read().is_ok()));
    }

    #[test]
    fn colliding_names_get_suffix() {
        let root = tempfile::tempdir().unwrap();
        touch_corpus(&root.path().join("a/b_c"));
        touch_corpus(&root.path().join("a_b/c"));
        touch_corpus(&root.path().join("a_b_c_2"));

        let corpora = discover(root.path()).unwrap();
        let names: Vec<&str> = corpora.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["a_b_c", "a_b_c_2", "a_b_c_2_2"]);
    }

    #[test]
    fn corpus_at_root() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("my_corpus");
        touch_corpus(&dir);

        let corpora = discover(&dir).unwrap();
        assert_eq!(corpora.len(), 1);
        assert_eq!(corpora[0].name(), "my_corpus");
    }

    #[test]
    fn missing_table() {
        let root = tempfile::tempdir().unwrap();
        touch_corpus(root.path());
        fs::remove_file(root.path().join("text.annis")).unwrap();

        let corpora = discover(root.path()).unwrap();
        assert!(matches!(
            corpora[0].read(),
            Err(Error::MissingTable {
                table: Table::Text,
                ..
            })
        ));
    }

    #[test]
    fn empty_root() {
        let root = tempfile::tempdir().unwrap();
        assert!(discover(root.path()).unwrap().is_empty());
    }
}
