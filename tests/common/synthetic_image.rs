use higher_order_gradient::image::NdImage;

/// `slope · index[axis]`, flat along every other axis.
pub fn ramp(shape: &[usize], axis: usize, slope: f32) -> NdImage {
    assert!(axis < shape.len(), "ramp axis out of range");
    NdImage::from_fn(shape, move |i| slope * i[axis] as f32)
}

pub fn constant(shape: &[usize], value: f32) -> NdImage {
    NdImage::from_fn(shape, move |_| value)
}

/// Smooth non-separable test pattern.
pub fn wavy(shape: &[usize]) -> NdImage {
    NdImage::from_fn(shape, |i| {
        let mut v = 0.0f32;
        for (d, &x) in i.iter().enumerate() {
            let f = 0.15 + 0.07 * d as f32;
            v += (f * x as f32).sin();
        }
        v + 0.01 * i.iter().map(|&x| x as f32).product::<f32>()
    })
}

/// Every index of `shape`, axis 0 fastest.
pub fn indices(shape: &[usize]) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let total: usize = shape.iter().product();
    for mut linear in 0..total {
        let mut idx = Vec::with_capacity(shape.len());
        for &n in shape {
            idx.push(linear % n);
            linear /= n;
        }
        out.push(idx);
    }
    out
}
