//! The image stack: every image of a log with its parsed objects.

use serde::Serialize;

use super::object::ImodObject;

/// One image of the stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackImage {
    /// 1-based index in boundary-encounter order.
    index: usize,
    objects: Vec<ImodObject>,
}

impl StackImage {
    pub fn new(index: usize, objects: Vec<ImodObject>) -> Self {
        Self { index, objects }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn objects(&self) -> &[ImodObject] {
        &self.objects
    }

    /// Objects whose name equals `name` exactly.
    pub fn objects_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ImodObject> {
        self.objects.iter().filter(move |obj| obj.name() == name)
    }
}

/// All images of one log, ordered by image index.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stack {
    images: Vec<StackImage>,
}

impl Stack {
    /// Build a stack from per-image object lists, numbering images from 1.
    pub fn from_objects<I>(per_image: I) -> Self
    where
        I: IntoIterator<Item = Vec<ImodObject>>,
    {
        let images = per_image
            .into_iter()
            .enumerate()
            .map(|(i, objects)| StackImage::new(i + 1, objects))
            .collect();
        Self { images }
    }

    pub fn images(&self) -> &[StackImage] {
        &self.images
    }

    /// Look up an image by its 1-based index.
    pub fn image(&self, index: usize) -> Option<&StackImage> {
        index.checked_sub(1).and_then(|i| self.images.get(i))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StackImage> {
        self.images.iter()
    }

    /// All objects named `name`, paired with their image index.
    pub fn objects_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (usize, &'a ImodObject)> {
        self.images
            .iter()
            .flat_map(move |image| image.objects_named(name).map(|obj| (image.index, obj)))
    }

    pub fn object_count(&self) -> usize {
        self.images.iter().map(|image| image.objects.len()).sum()
    }

    pub fn contour_count(&self) -> usize {
        self.images
            .iter()
            .flat_map(|image| image.objects.iter())
            .map(|obj| obj.contours().len())
            .sum()
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a StackImage;
    type IntoIter = std::slice::Iter<'a, StackImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}
