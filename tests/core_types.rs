use simscore::{BBox, ImageView, OwnedImage, SimScoreError};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).unwrap_err();
    assert_eq!(
        err,
        SimScoreError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride_and_small_buffer() {
    let data = [0u8; 8];
    assert_eq!(
        ImageView::new(&data, 4, 1, 3).unwrap_err(),
        SimScoreError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
    assert_eq!(
        ImageView::new(&data[..3], 2, 2, 2).unwrap_err(),
        SimScoreError::BufferTooSmall { needed: 4, got: 3 }
    );
}

#[test]
fn image_view_roi_shares_backing_buffer() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();
    assert!(view.is_contiguous());

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.stride(), 4);
    assert!(!roi.is_contiguous());
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
    assert_eq!(roi.get(0, 0).copied(), Some(5u8));
    assert!(roi.get(2, 0).is_none());
    assert_eq!(roi.rows().count(), 2);

    assert!(view.roi(3, 3, 2, 2).is_err());
}

#[test]
fn owned_image_requires_exact_length() {
    assert!(OwnedImage::new(vec![0u8; 6], 3, 2).is_ok());
    assert_eq!(
        OwnedImage::new(vec![0u8; 5], 3, 2).unwrap_err(),
        SimScoreError::BufferTooSmall { needed: 6, got: 5 }
    );
    assert!(OwnedImage::new(vec![0u8; 7], 3, 2).is_err());
}

#[test]
fn bbox_exposes_geometry() {
    let b = BBox::new(2.0, 3.0, 4.0, 5.0, 0.25).unwrap();
    assert_eq!(b.right(), 6.0);
    assert_eq!(b.bottom(), 8.0);
    assert_eq!(b.area(), 20.0);
    assert_eq!(b.score(), 0.25);
}
