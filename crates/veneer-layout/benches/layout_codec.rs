//! Benchmarks for layout parsing and encoding.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use veneer_layout::codec;

/// A document with `n` controls and `n` dynamic buttons.
fn generate_layout(n: usize) -> String {
    let mut xml = String::from(
        "<layout basePath=\"img\">\n  <form width=\"960\" height=\"540\" caption=\"Bench\"/>\n",
    );
    for i in 0..n {
        xml.push_str(&format!(
            "  <control name=\"lbl{i}\" type=\"Label\" x=\"{i}\" y=\"{i}\" width=\"80\" height=\"20\" \
             text=\"Label {i}\" foreColor=\"#112233\" font=\"Tahoma,9,Bold\" textAlign=\"MiddleLeft\"/>\n"
        ));
        xml.push_str(&format!(
            "  <dynamicButton name=\"btn{i}\" x=\"{i}\" y=\"40\" width=\"50\" height=\"20\" \
             action=\"OpenUrl\" argument=\"https://example.com/{i}\" normal=\"n.png\" hover=\"h.png\"/>\n"
        ));
    }
    xml.push_str("</layout>\n");
    xml
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_parse");

    for n in [10, 100, 1_000] {
        let xml = generate_layout(n);
        let label = format!("{n}");

        group.bench_with_input(BenchmarkId::new("from_xml_str", &label), &xml, |b, xml| {
            b.iter(|| codec::from_xml_str(xml));
        });
    }

    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_write");

    for n in [10, 100, 1_000] {
        let def = match codec::from_xml_str(&generate_layout(n)) {
            Ok(def) => def,
            Err(e) => panic!("bench layout failed to parse: {e}"),
        };
        let label = format!("{n}");

        group.bench_with_input(BenchmarkId::new("to_xml_string", &label), &def, |b, def| {
            b.iter(|| codec::to_xml_string(def));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_write);
criterion_main!(benches);
