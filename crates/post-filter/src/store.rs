//! Post collection storage with XDG path support.
//!
//! Posts are read from a JSON file, by default `~/.local/share/pf/posts.json`.
//! The file may hold either a bare array of posts or an object with a `posts`
//! field; saving always writes the object form.
//!
//! Both synchronous and asynchronous I/O methods are provided:
//! - `save()`, `load()` - Synchronous methods using `std::fs`
//! - `load_async()` - Asynchronous method using `tokio::fs`

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

use crate::model::{Post, PostCollection};
use crate::tags::find_duplicate_tag;

/// Default posts filename.
const POSTS_FILENAME: &str = "posts.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "pf";

/// Errors that can occur while reading or writing posts.
#[derive(Debug, Error)]
pub enum PostStoreError {
    /// Failed to determine XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read posts file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write posts file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A post lists the same tag more than once.
    #[error("post '{title}' lists tag '{tag}' more than once")]
    DuplicateTag {
        /// Title of the offending post.
        title: String,
        /// The repeated tag.
        tag: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for post store operations.
pub type Result<T> = std::result::Result<T, PostStoreError>;

/// File-backed source of posts.
///
/// # Example
///
/// ```no_run
/// use post_filter_rs::PostStore;
///
/// let store = PostStore::new()?;
///
/// // Load posts, or start from nothing if the file is missing
/// let posts = store.load_or_default()?;
/// println!("{} posts", posts.len());
/// # Ok::<(), post_filter_rs::PostStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PostStore {
    /// Path to the posts file.
    path: PathBuf,
}

impl PostStore {
    /// Creates a new `PostStore` with the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `PostStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a new `PostStore` reading from a specific file.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default XDG path for the posts file.
    ///
    /// On Unix: `~/.local/share/pf/posts.json`
    /// On macOS: `~/Library/Application Support/pf/posts.json`
    /// On Windows: `C:\Users\<User>\AppData\Roaming\pf\data\posts.json`
    ///
    /// # Errors
    ///
    /// Returns `PostStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(PostStoreError::NoDataDir)?;

        Ok(project_dirs.data_dir().join(POSTS_FILENAME))
    }

    /// Returns the path to the posts file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns true if the posts file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads posts from disk.
    ///
    /// # Errors
    ///
    /// - Returns `PostStoreError::ReadError` if the file cannot be read.
    /// - Returns `PostStoreError::Json` if the file contains invalid JSON.
    /// - Returns `PostStoreError::DuplicateTag` if a post repeats a tag.
    pub fn load(&self) -> Result<Vec<Post>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| PostStoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        self.parse(&contents)
    }

    /// Loads posts from disk, returning an empty list if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Same as [`load()`](Self::load), except that a missing file is not an error.
    pub fn load_or_default(&self) -> Result<Vec<Post>> {
        match self.load() {
            Ok(posts) => Ok(posts),
            Err(PostStoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                debug!(path = %self.path.display(), "posts file missing, using empty collection");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves posts to disk atomically.
    ///
    /// Creates the parent directory if it doesn't exist and writes through a
    /// temporary file followed by a rename.
    ///
    /// # Errors
    ///
    /// - Returns `PostStoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `PostStoreError::WriteError` if the file cannot be written.
    /// - Returns `PostStoreError::Json` if serialization fails.
    pub fn save(&self, posts: &[Post]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PostStoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let collection = PostCollection::new(posts.to_vec());
        let json = serde_json::to_string_pretty(&collection)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| PostStoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| PostStoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), count = posts.len(), "saved posts");
        Ok(())
    }

    // =========================================================================
    // Async I/O Methods
    // =========================================================================

    /// Loads posts from disk asynchronously.
    ///
    /// This is the async equivalent of [`load()`](Self::load).
    ///
    /// # Errors
    ///
    /// Same as [`load()`](Self::load).
    pub async fn load_async(&self) -> Result<Vec<Post>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PostStoreError::ReadError {
                path: self.path.clone(),
                source: e,
            })?;
        self.parse(&contents)
    }

    /// Loads posts asynchronously, returning an empty list if the file doesn't exist.
    ///
    /// This is the async equivalent of [`load_or_default()`](Self::load_or_default).
    pub async fn load_or_default_async(&self) -> Result<Vec<Post>> {
        match self.load_async().await {
            Ok(posts) => Ok(posts),
            Err(PostStoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                debug!(path = %self.path.display(), "posts file missing, using empty collection");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn parse(&self, contents: &str) -> Result<Vec<Post>> {
        let collection = PostCollection::from_json(contents)?;
        validate_posts(&collection.posts)?;
        debug!(path = %self.path.display(), count = collection.len(), "loaded posts");
        Ok(collection.posts)
    }
}

/// Checks that no post repeats a tag.
///
/// # Errors
///
/// Returns `PostStoreError::DuplicateTag` for the first offending post.
pub fn validate_posts(posts: &[Post]) -> Result<()> {
    for post in posts {
        if let Some(tag) = find_duplicate_tag(post) {
            return Err(PostStoreError::DuplicateTag {
                title: post.title.clone(),
                tag: tag.to_string(),
            });
        }
    }
    Ok(())
}
