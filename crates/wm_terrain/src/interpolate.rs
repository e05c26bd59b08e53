// crates/wm_terrain/src/interpolate.rs

//! n 维逐轴线性插值
//!
//! 对分数坐标逐轴分解：先沿第一个轴取整数下界和上界，
//! 按小数偏移做加权平均，剩余轴递归处理。
//! 二维情形即双线性插值；高维剖面采样可直接复用。
//!
//! 采样闭包接收整数格点索引，越界处理（如基准值回退）由调用方
//! 在闭包内完成，本模块不做任何边界假设。

/// 在分数坐标 `pos` 处对格点采样函数 `sample` 做线性插值
///
/// # 示例
///
/// ```
/// use wm_terrain::interpolate::linear_interpolate;
///
/// // f(x, y) = x * y 在 (0.5, 0.5) 处的双线性插值
/// let v = linear_interpolate(&[0.5, 0.5], &|idx: &[i64]| {
///     (idx[0] * idx[1]) as f64
/// });
/// assert!((v - 0.25).abs() < 1e-12);
/// ```
pub fn linear_interpolate<F>(pos: &[f64], sample: &F) -> f64
where
    F: Fn(&[i64]) -> f64,
{
    let mut indices = Vec::with_capacity(pos.len());
    recurse(pos, &mut indices, sample)
}

fn recurse<F>(pos: &[f64], indices: &mut Vec<i64>, sample: &F) -> f64
where
    F: Fn(&[i64]) -> f64,
{
    let Some((&value, rest)) = pos.split_first() else {
        return sample(indices);
    };

    let base = value.floor();
    let frac = value - base;
    let index = base as i64;

    indices.push(index);
    let lower = recurse(rest, indices, sample);
    indices.pop();

    indices.push(index + 1);
    let upper = recurse(rest, indices, sample);
    indices.pop();

    lower * (1.0 - frac) + upper * frac
}
