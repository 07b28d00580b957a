use hrm::lang::ErrorCode;
use hrm::mach::{compile, Chunk};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random program of keyword statements and label declarations, with the
/// offset every label is expected at and every jump operand's position.
struct Generated {
    source: String,
    labels: Vec<usize>,
    jumps: Vec<(usize, usize)>,
}

fn generate(rng: &mut StdRng) -> Generated {
    let label_count = rng.gen_range(1..5);
    let statement_count = rng.gen_range(1..40);
    let mut declare_at: Vec<usize> = (0..label_count)
        .map(|_| rng.gen_range(0..=statement_count))
        .collect();
    declare_at.sort();

    let mut source = String::new();
    let mut labels = vec![0; label_count];
    let mut jumps = vec![];
    let mut offset = 0;
    let mut next_label = 0;
    for n in 0..=statement_count {
        while next_label < label_count && declare_at[next_label] == n {
            source.push_str(&format!("l{}:\n", next_label));
            labels[next_label] = offset;
            next_label += 1;
        }
        if n == statement_count {
            break;
        }
        match rng.gen_range(0..5) {
            0 => {
                source.push_str("INBOX\n");
                offset += 1;
            }
            1 => {
                source.push_str("OUTBOX\n");
                offset += 1;
            }
            2 => {
                let keyword = ["JUMP", "JUMPZ", "JUMPN"][rng.gen_range(0..3)];
                let label = rng.gen_range(0..label_count);
                source.push_str(&format!("{} l{}\n", keyword, label));
                jumps.push((offset + 1, label));
                offset += 2;
            }
            _ => {
                let keyword = ["COPYFROM", "COPYTO", "ADD", "SUB"][rng.gen_range(0..4)];
                source.push_str(&format!("{} {}\n", keyword, rng.gen_range(0..10)));
                offset += 3;
            }
        }
    }
    Generated {
        source,
        labels,
        jumps,
    }
}

#[test]
fn test_jump_operands_hold_label_offsets() {
    let mut rng = StdRng::seed_from_u64(0x4852_4d);
    for _ in 0..200 {
        let program = generate(&mut rng);
        let mut chunk = Chunk::new();
        let result = compile(&program.source, &mut chunk);
        assert!(result.is_ok(), "{}\n{:?}", program.source, result);
        for (operand, label) in &program.jumps {
            assert_eq!(
                chunk.code()[*operand] as usize,
                program.labels[*label],
                "{}",
                program.source
            );
        }
    }
}

#[test]
fn test_missing_label_cited_at_first_use() {
    let source = "INBOX\nJUMPZ gone\nOUTBOX\nJUMP gone\nJUMPN here\nhere:\n";
    let mut chunk = Chunk::new();
    let errors = compile(source, &mut chunk).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), ErrorCode::UndefinedLabel);
    assert_eq!(errors[0].line(), Some(2));
    assert_eq!(errors[0].column(), Some(7));
}
