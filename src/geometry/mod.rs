pub mod footprint;
pub mod homography;
