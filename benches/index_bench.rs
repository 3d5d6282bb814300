use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use semdex::{index_source, Language};

const PYTHON_SOURCE: &str = r#"
from typing import Dict, List
from enum import Enum

class Status(Enum):
    ACTIVE = 1
    IDLE = 2

class Registry:
    """Keeps handlers by name."""

    def __init__(self, limit: int = 16):
        self.limit = limit
        self.entries: Dict[str, int] = {}

    def register(self, name: str, value: int) -> None:
        self.entries[name] = value

    def lookup(self, name: str) -> int:
        return self.entries.get(name, 0)

def build_default() -> Registry:
    registry = Registry()
    for index in range(4):
        registry.register(f"slot{index}", index)
    return registry

HANDLERS = [build_default]
"#;

const TYPESCRIPT_SOURCE: &str = r#"
import { EventEmitter } from "events";

export interface Task {
    id: number;
    run(): Promise<void>;
}

export class Scheduler extends EventEmitter {
    private readonly tasks: Task[] = [];

    constructor(public capacity: number) {
        super();
    }

    enqueue(task: Task): void {
        this.tasks.push(task);
        this.emit("queued", task.id);
    }

    async drain(): Promise<number> {
        const started = this.tasks.map(t => t.run());
        await Promise.all(started);
        return started.length;
    }
}

export const scheduler = new Scheduler(8);
"#;

const RUST_SOURCE: &str = r#"
use std::collections::HashMap;

pub struct Cache {
    entries: HashMap<String, u64>,
    capacity: usize,
}

impl Cache {
    pub fn new(capacity: usize) -> Self {
        Cache { entries: HashMap::new(), capacity }
    }

    pub fn insert(&mut self, key: String, value: u64) {
        if self.entries.len() < self.capacity {
            self.entries.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }
}

pub fn warm(cache: &mut Cache) {
    for i in 0..8 {
        cache.insert(format!("k{i}"), i);
    }
}
"#;

fn bench_index_single_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_single_file");
    for (name, language, source) in [
        ("python", Language::Python, PYTHON_SOURCE),
        ("typescript", Language::TypeScript, TYPESCRIPT_SOURCE),
        ("rust", Language::Rust, RUST_SOURCE),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &source, |b, src| {
            b.iter(|| {
                let index = index_source("bench_input", black_box(src), language).unwrap();
                black_box(index.stats())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_index_single_file);
criterion_main!(benches);
