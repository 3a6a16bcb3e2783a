//! Tests for average color computation and color distance

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::raster::buffer::PixelBuffer;
    use photomosaic::raster::color::{Color, average, average_all};

    // Tests uniform buffers average to their own color
    // Verified by dividing by width instead of pixel count
    #[test]
    fn test_average_uniform() {
        let buffer = PixelBuffer::<u8>::filled(3, 5, [10, 20, 30]);
        assert_eq!(average(&buffer).unwrap(), Color::new(10.0, 20.0, 30.0));
    }

    // Tests averages keep their fractional part
    // Verified by truncating the mean
    #[test]
    fn test_average_is_fractional() {
        let buffer = PixelBuffer::<u8>::from_raw(2, 1, vec![0, 0, 0, 1, 2, 255]).unwrap();
        let mean = average(&buffer).unwrap();

        assert!((mean.red() - 0.5).abs() < 1e-12);
        assert!((mean.green() - 1.0).abs() < 1e-12);
        assert!((mean.blue() - 127.5).abs() < 1e-12);
        assert_eq!(mean.truncated(), Color::new(0.0, 1.0, 127.0));
    }

    // Tests large saturated buffers do not overflow the accumulator
    // Verified by summing in the channel type
    #[test]
    fn test_average_large_buffer() {
        let buffer = PixelBuffer::<u16>::filled(512, 512, [u16::MAX, 0, 1]);
        let mean = average(&buffer).unwrap();

        assert!((mean.red() - f64::from(u16::MAX)).abs() < 1e-9);
        assert!(mean.green().abs() < 1e-12);
        assert!((mean.blue() - 1.0).abs() < 1e-12);
    }

    // Tests zero-pixel buffers are rejected instead of dividing by zero
    // Verified by returning a black average for empty buffers
    #[test]
    fn test_average_empty_fails() {
        let result = average(&PixelBuffer::<u8>::new(0, 4));
        assert!(matches!(
            result,
            Err(MosaicError::EmptyInput {
                width: 0,
                height: 4
            })
        ));
    }

    // Tests batch averaging keeps input order and fails on any empty buffer
    // Verified by collecting results unordered
    #[test]
    fn test_average_all_order_and_failure() {
        let buffers: Vec<PixelBuffer> = (0..16)
            .map(|i| PixelBuffer::filled(2, 2, [i, 0, 0]))
            .collect();
        let averages = average_all(&buffers).unwrap();

        for (i, mean) in averages.iter().enumerate() {
            assert!((mean.red() - i as f64).abs() < 1e-12);
        }

        let mut with_empty = buffers;
        with_empty.push(PixelBuffer::new(0, 0));
        assert!(average_all(&with_empty).is_err());
    }

    // Tests squared distance is symmetric and matches the definition
    // Verified by dropping the blue term
    #[test]
    fn test_distance_squared() {
        let a = Color::new(1.0, 2.0, 3.0);
        let b = Color::new(4.0, 6.0, 15.0);

        assert!((a.distance_squared(&b) - 169.0).abs() < 1e-12);
        assert!((b.distance_squared(&a) - 169.0).abs() < 1e-12);
        assert!(a.distance_squared(&a).abs() < 1e-12);
    }

    // Tests conversion from 8-bit pixels and component access
    // Verified by swapping red and blue in the conversion
    #[test]
    fn test_color_from_pixel() {
        let color = Color::from([255, 128, 0]);
        assert!((color.component(0) - 255.0).abs() < 1e-12);
        assert!((color.component(1) - 128.0).abs() < 1e-12);
        assert!(color.component(2).abs() < 1e-12);
        assert!(color.component(3).abs() < 1e-12);
    }
}
