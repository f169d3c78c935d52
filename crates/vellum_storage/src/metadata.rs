//! Peripheral metadata tables: file statuses, directory members, type
//! annotations, and property-editor paths.
//!
//! These tables follow the same replacement contract as the type tables:
//! each `replace_*` call takes the set of updated keys and the full new
//! row set for those keys, so an updated key with no rows means deletion.

use vellum_foundation::{Error, ErrorKind, ModuleId, Result, SourceId, TypeId};

use crate::package::{DirectoryInfo, FileKind, FileStatus, PropertyEditorPath, TypeAnnotation};
use crate::store::Store;

impl Store {
    // --- File statuses ---

    /// Replaces the file statuses of the given sources.
    ///
    /// # Errors
    ///
    /// Fails if a row carries the null source id.
    pub fn replace_file_statuses(
        &mut self,
        updated_sources: &[SourceId],
        rows: &[FileStatus],
    ) -> Result<()> {
        for row in rows {
            if row.source.is_null() {
                return Err(Error::new(ErrorKind::FileStatusHasInvalidSourceId));
            }
        }
        for source in updated_sources {
            self.file_statuses.remove(source);
        }
        for row in rows {
            self.file_statuses.insert(row.source, *row);
        }
        Ok(())
    }

    /// Gets the stored file status of a source.
    #[must_use]
    pub fn file_status(&self, source: SourceId) -> Option<FileStatus> {
        self.file_statuses.get(&source).copied()
    }

    /// Returns all stored file statuses, ordered by source id.
    #[must_use]
    pub fn all_file_statuses(&self) -> Vec<FileStatus> {
        let mut rows: Vec<FileStatus> = self.file_statuses.values().copied().collect();
        rows.sort_unstable_by_key(|row| row.source);
        rows
    }

    // --- Directory infos ---

    /// Replaces the member rows of the given directories.
    ///
    /// # Errors
    ///
    /// Fails if a row carries a null directory or source id.
    pub fn replace_directory_infos(
        &mut self,
        updated_directories: &[SourceId],
        rows: &[DirectoryInfo],
    ) -> Result<()> {
        for row in rows {
            if row.directory.is_null() || row.source.is_null() {
                return Err(Error::new(ErrorKind::DirectoryInfoHasInvalidSourceId));
            }
        }
        for directory in updated_directories {
            self.directory_infos.remove(directory);
        }
        for row in rows {
            self.directory_infos
                .entry_or_default(row.directory)
                .push(row.clone());
        }
        Ok(())
    }

    /// The member rows of a directory.
    #[must_use]
    pub fn directory_infos(&self, directory: SourceId) -> &[DirectoryInfo] {
        self.directory_infos
            .get(&directory)
            .map_or(&[][..], Vec::as_slice)
    }

    /// The member rows of a directory with the given kind.
    #[must_use]
    pub fn directory_infos_by_kind(&self, directory: SourceId, kind: FileKind) -> Vec<DirectoryInfo> {
        self.directory_infos(directory)
            .iter()
            .filter(|row| row.kind == kind)
            .cloned()
            .collect()
    }

    /// Gets one member row of a directory by member source.
    #[must_use]
    pub fn directory_info(&self, directory: SourceId, source: SourceId) -> Option<&DirectoryInfo> {
        self.directory_infos(directory)
            .iter()
            .find(|row| row.source == source)
    }

    /// Source ids of a directory's subdirectory members.
    #[must_use]
    pub fn subdirectory_source_ids(&self, directory: SourceId) -> Vec<SourceId> {
        self.directory_infos_by_kind(directory, FileKind::Directory)
            .iter()
            .map(|row| row.source)
            .collect()
    }

    // --- Type annotations ---

    /// Replaces the annotations of the given annotation sources.
    pub fn replace_type_annotations(
        &mut self,
        updated_sources: &[SourceId],
        rows: &[TypeAnnotation],
    ) {
        for source in updated_sources {
            if let Some(old_rows) = self.annotations.remove(source) {
                for row in old_rows {
                    self.annotations_by_key.remove(&(row.module, row.type_name));
                }
            }
        }
        for row in rows {
            self.annotations
                .entry_or_default(row.source)
                .push(row.clone());
            self.annotations_by_key
                .insert((row.module, row.type_name.clone()), row.clone());
        }
    }

    /// The annotations carried by one metainfo source.
    #[must_use]
    pub fn type_annotations_in(&self, source: SourceId) -> &[TypeAnnotation] {
        self.annotations
            .get(&source)
            .map_or(&[][..], Vec::as_slice)
    }

    /// The annotation applying to a type, through any of its exported names.
    #[must_use]
    pub fn type_annotation(&self, id: TypeId) -> Option<&TypeAnnotation> {
        let record = self.type_record(id)?;
        record.exported_types.iter().find_map(|export| {
            self.annotations_by_key
                .get(&(export.module, export.name.clone()))
        })
    }

    /// The icon path annotated for a type, if any.
    #[must_use]
    pub fn type_icon_path(&self, id: TypeId) -> Option<&str> {
        self.type_annotation(id)
            .map(|annotation| annotation.icon_path.as_str())
            .filter(|path| !path.is_empty())
    }

    /// The opaque hints text annotated for a type, if any.
    #[must_use]
    pub fn type_hints(&self, id: TypeId) -> Option<&str> {
        self.type_annotation(id)
            .map(|annotation| annotation.hints.as_str())
            .filter(|hints| !hints.is_empty())
    }

    /// The opaque item-library entries annotated for a type, if any.
    #[must_use]
    pub fn item_library_entries(&self, id: TypeId) -> Option<&str> {
        self.type_annotation(id)
            .map(|annotation| annotation.item_library_entries.as_str())
            .filter(|entries| !entries.is_empty())
    }

    /// Every non-empty item-library entries text in the store.
    #[must_use]
    pub fn all_item_library_entries(&self) -> Vec<&str> {
        let mut entries: Vec<&str> = self
            .annotations_by_key
            .values()
            .map(|annotation| annotation.item_library_entries.as_str())
            .filter(|entries| !entries.is_empty())
            .collect();
        entries.sort_unstable();
        entries
    }

    // --- Property-editor paths ---

    /// Replaces the property-editor mappings collected from the given
    /// directories.
    pub fn replace_property_editor_paths(
        &mut self,
        updated_directories: &[SourceId],
        rows: &[PropertyEditorPath],
    ) {
        for directory in updated_directories {
            if let Some(keys) = self.editor_paths_by_directory.remove(directory) {
                for key in keys {
                    self.property_editor_paths.remove(&key);
                }
            }
        }
        for row in rows {
            let key = (row.module, row.type_name.clone());
            self.property_editor_paths.insert(key.clone(), row.clone());
            self.editor_paths_by_directory
                .entry_or_default(row.directory)
                .push(key);
        }
    }

    /// The editor document for one (module, exported name) pair.
    #[must_use]
    pub fn property_editor_path(&self, module: ModuleId, type_name: &str) -> Option<&PropertyEditorPath> {
        self.property_editor_paths
            .get(&(module, type_name.to_owned()))
    }

    /// The editor document source for a type, through any of its exported
    /// names.
    #[must_use]
    pub fn property_editor_source(&self, id: TypeId) -> Option<SourceId> {
        let record = self.type_record(id)?;
        record.exported_types.iter().find_map(|export| {
            self.property_editor_paths
                .get(&(export.module, export.name.clone()))
                .map(|row| row.source)
        })
    }
}
