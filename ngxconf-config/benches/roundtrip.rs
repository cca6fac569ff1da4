use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ngxconf_config::parse;

fn sample(servers: usize) -> String {
    let mut source = String::from("worker_processes auto;\nevents {\n    worker_connections 1024;\n}\nhttp {\n");
    for i in 0..servers {
        source.push_str(&format!(
            "    # site {i}\n    server {{\n        listen 80;\n        server_name site{i}.example.com;\n        location / {{\n            proxy_pass http://127.0.0.1:{port};\n        }}\n    }}\n",
            port = 3000 + i
        ));
    }
    source.push_str("}\n");
    source
}

fn bench_roundtrip(c: &mut Criterion) {
    let source = sample(200);
    let tree = parse(&source).unwrap();

    c.bench_function("parse", |b| b.iter(|| parse(black_box(&source)).unwrap()));
    c.bench_function("dump", |b| b.iter(|| black_box(&tree).dump(0)));
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);
