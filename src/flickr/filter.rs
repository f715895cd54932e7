use super::models::RawPhoto;

/// Keeps the photos whose original dimensions reach the given minimums.
///
/// Only active thresholds are checked, and a photo without the matching
/// dimension is dropped. Order is preserved.
pub fn filter_by_dimensions(photos: Vec<RawPhoto>, min_width: Option<u32>, min_height: Option<u32>) -> Vec<RawPhoto> {
    if min_width.is_none() && min_height.is_none() {
        return photos;
    }

    photos
        .into_iter()
        .filter(|photo| {
            let reaches = |min: Option<u32>, value: Option<u32>| match min {
                Some(min) => value.is_some_and(|value| value >= min),
                None => true,
            };

            reaches(min_width, photo.original_width()) && reaches(min_height, photo.original_height())
        })
        .collect()
}
