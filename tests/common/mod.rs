#![allow(unused)]

use pretty_values::{render, render_with, Inspect, Registry, RenderOptions};

pub fn compare_lines(message: &str, actual: &str, expected: &[&str]) {
    let actual = actual.lines().collect::<Vec<_>>();
    if actual != expected {
        eprintln!(
            "{}\nEXPECTED:\n{}\nACTUAL:\n{}\n=========",
            message,
            expected.join("\n"),
            actual.join("\n"),
        );
        assert_eq!(actual, expected);
    }
}

/// Default options, at the given max width. The ribbon shrinks to fit.
pub fn options(width: usize) -> RenderOptions {
    RenderOptions::default().with_width(width)
}

#[track_caller]
pub fn assert_render(value: &dyn Inspect, width: usize, expected_lines: &[&str]) {
    assert_render_opts(value, &options(width), expected_lines)
}

#[track_caller]
pub fn assert_render_opts(value: &dyn Inspect, options: &RenderOptions, expected_lines: &[&str]) {
    let actual = render(value, options).unwrap();
    compare_lines(
        &format!("IN RENDER AT WIDTH {}", options.max_width),
        &actual,
        expected_lines,
    );
}

#[track_caller]
pub fn assert_render_with(
    registry: &Registry,
    value: &dyn Inspect,
    width: usize,
    expected_lines: &[&str],
) {
    let actual = render_with(registry, value, &options(width)).unwrap();
    compare_lines(
        &format!("IN RENDER WITH REGISTRY AT WIDTH {}", width),
        &actual,
        expected_lines,
    );
}
