// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gitpulse::{
    BadgeCache, BadgeContent, CacheKey, HexColor, render_badge, render_error_badge,
    select_primary_language,
};

fn benchmark_render_badge(c: &mut Criterion,)
{
    let content = BadgeContent {
        owner:      "octocat",
        repository: "Hello-World",
        message:    "HTML",
        color:      "#007acc",
    };

    c.bench_function("render_badge", |b| {
        b.iter(|| render_badge(black_box(&content,),).expect("render failed",),)
    },);
}

fn benchmark_render_error_badge(c: &mut Criterion,)
{
    c.bench_function("render_error_badge", |b| {
        b.iter(|| render_error_badge(black_box("User or repo not found",),),)
    },);
}

fn benchmark_color_resolution(c: &mut Criterion,)
{
    let inputs = ["#0af", "00aaff", "not-a-color", ""];

    c.bench_function("resolve_colors", |b| {
        b.iter(|| {
            for input in inputs {
                black_box(HexColor::resolve(Some(black_box(input,),),),);
            }
        },)
    },);
}

fn benchmark_language_selection(c: &mut Criterion,)
{
    let languages: HashMap<String, u64,> =
        (0..50).map(|index| (format!("Language{index}"), index * 97 % 1013,),).collect();

    c.bench_function("select_primary_language_50", |b| {
        b.iter(|| select_primary_language(black_box(&languages,),),)
    },);
}

fn benchmark_cache_lookup(c: &mut Criterion,)
{
    let cache = BadgeCache::default();
    for index in 0..1000 {
        cache.put(CacheKey::new(format!("user{index}"), "#007acc",), "<svg/>".to_owned(),);
    }
    let key = CacheKey::new("user500", "#007acc",);

    c.bench_function("cache_get_1000", |b| b.iter(|| cache.get(black_box(&key,),),),);
}

criterion_group!(
    benches,
    benchmark_render_badge,
    benchmark_render_error_badge,
    benchmark_color_resolution,
    benchmark_language_selection,
    benchmark_cache_lookup
);
criterion_main!(benches);
