//! Media bookkeeping for the product form.
//!
//! Existing assets are never edited in place: the form records which URLs the
//! admin marked for removal, and which new files are waiting to be uploaded.
//! Both lists travel with the submission.

/// Which stored asset list a removal applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Media,
    GalleryImage,
    GalleryVideo,
    GalleryModel,
}

impl MediaKind {
    pub const ALL: [MediaKind; 4] = [
        MediaKind::Media,
        MediaKind::GalleryImage,
        MediaKind::GalleryVideo,
        MediaKind::GalleryModel,
    ];

    /// Submission field carrying the removal list.
    pub fn removal_field(self) -> &'static str {
        match self {
            MediaKind::Media => "mediaToRemove",
            MediaKind::GalleryImage => "galleryImagesToRemove",
            MediaKind::GalleryVideo => "galleryVideosToRemove",
            MediaKind::GalleryModel => "galleryModelsToRemove",
        }
    }
}

/// URLs marked for removal, per asset list, in the order they were marked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRemovals {
    media: Vec<String>,
    gallery_images: Vec<String>,
    gallery_videos: Vec<String>,
    gallery_models: Vec<String>,
}

impl MediaRemovals {
    fn list_mut(&mut self, kind: MediaKind) -> &mut Vec<String> {
        match kind {
            MediaKind::Media => &mut self.media,
            MediaKind::GalleryImage => &mut self.gallery_images,
            MediaKind::GalleryVideo => &mut self.gallery_videos,
            MediaKind::GalleryModel => &mut self.gallery_models,
        }
    }

    pub fn list(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Media => &self.media,
            MediaKind::GalleryImage => &self.gallery_images,
            MediaKind::GalleryVideo => &self.gallery_videos,
            MediaKind::GalleryModel => &self.gallery_models,
        }
    }

    /// Mark `url` for removal, or unmark it if already marked. Returns whether
    /// the URL is marked afterwards.
    pub fn toggle(&mut self, kind: MediaKind, url: &str) -> bool {
        let list = self.list_mut(kind);
        match list.iter().position(|u| u == url) {
            Some(i) => {
                list.remove(i);
                false
            }
            None => {
                list.push(url.to_string());
                true
            }
        }
    }

    pub fn is_marked(&self, kind: MediaKind, url: &str) -> bool {
        self.list(kind).iter().any(|u| u == url)
    }
}

/// A file picked for upload but not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub file_name: String,
    /// Handle the rendering layer uses to preview the file.
    pub preview: String,
}

impl NewMedia {
    pub fn new(file_name: impl Into<String>, preview: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            preview: preview.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingUploads {
    items: Vec<NewMedia>,
}

impl PendingUploads {
    pub fn extend(&mut self, files: impl IntoIterator<Item = NewMedia>) {
        self.items.extend(files);
    }

    /// Drop the pending file at `index`. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<NewMedia> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &NewMedia> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
