//! Routes a changed file to the parser and state field that own it.
//!
//! The decision is made from the name of the file's immediate parent
//! directory only, e.g. `data/foods/list.csv` routes by `foods`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::parse::{parse_foods, parse_macro_days, ParseError};
use crate::state::StateWriter;

/// A kind of data file: which parser reads it and which state field it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Foods,
    Targets,
}

impl Category {
    /// Parses the file and, on success, replaces this category's state.
    ///
    /// Returns the number of records installed. On error the store is untouched.
    pub fn apply(self, path: &Path, writer: &dyn StateWriter) -> Result<usize, ParseError> {
        match self {
            Category::Foods => {
                let foods = parse_foods(path)?;
                let count = foods.len();
                writer.replace_foods(foods);
                Ok(count)
            }
            Category::Targets => {
                let days = parse_macro_days(path)?;
                let count = days.len();
                writer.replace_targets(days);
                Ok(count)
            }
        }
    }

    /// Parse from string name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "foods" => Some(Category::Foods),
            "targets" => Some(Category::Targets),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Foods => write!(f, "foods"),
            Category::Targets => write!(f, "targets"),
        }
    }
}

/// Directory name to category table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Routes(BTreeMap<String, Category>);

impl Default for Routes {
    fn default() -> Self {
        Self(BTreeMap::from([
            ("foods".to_string(), Category::Foods),
            ("targets".to_string(), Category::Targets),
        ]))
    }
}

impl Routes {
    pub fn new(routes: BTreeMap<String, Category>) -> Self {
        Self(routes)
    }

    /// Adds or replaces the category for a directory name.
    pub fn with_route(mut self, dir_name: impl Into<String>, category: Category) -> Self {
        self.0.insert(dir_name.into(), category);
        self
    }

    /// Category for a file, decided by its parent directory's name.
    pub fn resolve(&self, path: &Path) -> Option<Category> {
        let dir_name = path.parent()?.file_name()?.to_str()?;
        self.0.get(dir_name).copied()
    }

    /// Directory names that have a route.
    pub fn dir_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Category)> {
        self.0.iter().map(|(name, category)| (name.as_str(), *category))
    }
}

/// What happened to a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// No route for the parent directory.
    Ignored,
    /// Parsed and installed into the store.
    Applied { category: Category, records: usize },
    /// Routed but the file was rejected; previous state kept.
    Rejected { category: Category },
}

/// Dispatches changed files to their category and writes the result to the store.
pub struct ChangeRouter {
    routes: Routes,
    writer: Arc<dyn StateWriter>,
}

impl ChangeRouter {
    pub fn new(routes: Routes, writer: Arc<dyn StateWriter>) -> Self {
        Self { routes, writer }
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn resolve(&self, path: &Path) -> Option<Category> {
        self.routes.resolve(path)
    }

    /// Routes one changed file. Parse failures are logged and swallowed so a bad
    /// edit never clears last-known-good data.
    pub fn handle_change(&self, path: &Path) -> RouteOutcome {
        let Some(category) = self.resolve(path) else {
            tracing::debug!(path = %path.display(), "No route for file, ignoring");
            return RouteOutcome::Ignored;
        };

        match category.apply(path, self.writer.as_ref()) {
            Ok(records) => {
                tracing::info!(
                    path = %path.display(),
                    %category,
                    records,
                    "Loaded {} file",
                    category
                );
                RouteOutcome::Applied { category, records }
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    %category,
                    "Error parsing {}: {}",
                    category,
                    e
                );
                RouteOutcome::Rejected { category }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Food, MacroDay};
    use crate::parse::MACRO_HEADER;
    use crate::state::{StateReader, StateStore};
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::{tempdir, TempDir};

    /// Records which writer methods were called.
    #[derive(Default)]
    struct RecordingWriter {
        calls: Mutex<Vec<&'static str>>,
    }

    impl StateWriter for RecordingWriter {
        fn replace_foods(&self, _foods: Vec<Food>) {
            self.calls.lock().unwrap().push("foods");
        }

        fn replace_targets(&self, _targets: Vec<MacroDay>) {
            self.calls.lock().unwrap().push("targets");
        }
    }

    const DAY_ROW: &str = "1/2/2024,2200,80.1,80.5,2000,150,60,200,2200,160,70,220";

    fn write(dir: &TempDir, rel: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn macro_file(rows: &[&str]) -> String {
        let mut out = MACRO_HEADER.join(",");
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_routes_resolve_by_parent_name() {
        let routes = Routes::default();
        assert_eq!(
            routes.resolve(Path::new("data/foods/list.csv")),
            Some(Category::Foods)
        );
        assert_eq!(
            routes.resolve(Path::new("/srv/data/targets/days.csv")),
            Some(Category::Targets)
        );
        assert_eq!(routes.resolve(Path::new("data/other/list.csv")), None);
        assert_eq!(routes.resolve(Path::new("list.csv")), None);
    }

    #[test]
    fn test_routes_only_look_at_immediate_parent() {
        let routes = Routes::default();
        assert_eq!(routes.resolve(Path::new("foods/archive/list.csv")), None);
        assert_eq!(routes.resolve(Path::new("foods")), None);
    }

    #[test]
    fn test_routes_are_case_sensitive() {
        let routes = Routes::default();
        assert_eq!(routes.resolve(Path::new("data/Foods/list.csv")), None);
    }

    #[test]
    fn test_routes_with_custom_directory() {
        let routes = Routes::default().with_route("pantry", Category::Foods);
        assert_eq!(
            routes.resolve(Path::new("data/pantry/list.csv")),
            Some(Category::Foods)
        );
        assert_eq!(routes.dir_names().count(), 3);
    }

    #[test]
    fn test_routes_deserialize_from_map() {
        let routes: Routes = serde_json::from_str(r#"{"food":"foods","goals":"targets"}"#).unwrap();
        assert_eq!(
            routes.resolve(Path::new("x/goals/a.csv")),
            Some(Category::Targets)
        );
        assert_eq!(routes.resolve(Path::new("x/foods/a.csv")), None);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("Foods"), Some(Category::Foods));
        assert_eq!(Category::parse("targets"), Some(Category::Targets));
        assert_eq!(Category::parse("meals"), None);
    }

    #[test]
    fn test_foods_path_calls_only_food_parser() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "foods/list.csv", "Food Name\nRice\n");
        let writer = Arc::new(RecordingWriter::default());
        let router = ChangeRouter::new(Routes::default(), writer.clone());

        let outcome = router.handle_change(&path);

        assert_eq!(
            outcome,
            RouteOutcome::Applied {
                category: Category::Foods,
                records: 1
            }
        );
        assert_eq!(*writer.calls.lock().unwrap(), vec!["foods"]);
    }

    #[test]
    fn test_targets_path_calls_only_macro_parser() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "targets/days.csv", &macro_file(&[DAY_ROW]));
        let writer = Arc::new(RecordingWriter::default());
        let router = ChangeRouter::new(Routes::default(), writer.clone());

        let outcome = router.handle_change(&path);

        assert_eq!(
            outcome,
            RouteOutcome::Applied {
                category: Category::Targets,
                records: 1
            }
        );
        assert_eq!(*writer.calls.lock().unwrap(), vec!["targets"]);
    }

    #[test]
    fn test_unrouted_directory_is_ignored() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "notes/list.csv", "Food Name\nRice\n");
        let writer = Arc::new(RecordingWriter::default());
        let router = ChangeRouter::new(Routes::default(), writer.clone());

        assert_eq!(router.handle_change(&path), RouteOutcome::Ignored);
        assert!(writer.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failed_parse_keeps_previous_targets() {
        let dir = tempdir().unwrap();
        let store = Arc::new(StateStore::new());
        let router = ChangeRouter::new(Routes::default(), store.clone());

        let path = write(&dir, "targets/days.csv", &macro_file(&[DAY_ROW]));
        router.handle_change(&path);
        let before = store.current_state();
        assert_eq!(before.targets.len(), 1);

        // Ten of the twelve columns.
        let short_header = MACRO_HEADER[..10].join(",");
        fs::write(&path, format!("{short_header}\n1/3/2024,1,2,3,4,5,6,7,8,9\n")).unwrap();
        let outcome = router.handle_change(&path);

        assert_eq!(
            outcome,
            RouteOutcome::Rejected {
                category: Category::Targets
            }
        );
        assert_eq!(store.current_state().targets, before.targets);
    }

    #[test]
    fn test_failed_parse_keeps_previous_foods() {
        let dir = tempdir().unwrap();
        let store = Arc::new(StateStore::new());
        let router = ChangeRouter::new(Routes::default(), store.clone());

        let path = write(&dir, "foods/list.csv", "Food Name\nRice\nOats\n");
        router.handle_change(&path);

        fs::write(&path, "Foods\nEggs\n").unwrap();
        router.handle_change(&path);

        let names: Vec<String> = store
            .current_state()
            .foods
            .iter()
            .map(|f| f.name.clone())
            .collect();
        assert_eq!(names, vec!["Rice", "Oats"]);
    }

    #[test]
    fn test_missing_file_is_rejected_not_fatal() {
        let dir = tempdir().unwrap();
        let store = Arc::new(StateStore::new());
        let router = ChangeRouter::new(Routes::default(), store);

        let outcome = router.handle_change(&dir.path().join("foods").join("gone.csv"));
        assert_eq!(
            outcome,
            RouteOutcome::Rejected {
                category: Category::Foods
            }
        );
    }
}
