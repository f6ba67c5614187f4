// End-to-end runs of the monitor over in-memory sniffer output
use lin_trace_decoder::{LineReader, Monitor, MonitorConfig};

fn run(config: &MonitorConfig, input: &[u8]) -> Vec<String> {
    // Route the monitor's trace/debug logging through the test harness
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();

    let mut monitor = Monitor::new(config);
    let mut lines = LineReader::new(input).with_strip_cr(config.strip_cr);
    let mut out = Vec::new();
    monitor.run(&mut lines, &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Split `SSSSS.mmm  rest` into milliseconds and the rest
fn split_timestamp(line: &str) -> (u64, &str) {
    let (stamp, rest) = line.split_once("  ").unwrap();
    let (secs, millis) = stamp.split_once('.').unwrap();
    assert_eq!(secs.len(), 5, "seconds field in {:?}", line);
    assert_eq!(millis.len(), 3, "millis field in {:?}", line);
    let ms = secs.parse::<u64>().unwrap() * 1000 + millis.parse::<u64>().unwrap();
    (ms, rest)
}

#[test]
fn diff_mode_reports_only_changed_bits() {
    let config = MonitorConfig::new().with_diff_mode(true);
    let output = run(&config, b"2a 01 02 ff\n2a 01 03 ff\n");

    assert_eq!(output.len(), 1);
    let (_, rest) = split_timestamp(&output[0]);
    // 0x02 -> 0x03 flips only the last bit of the second byte
    assert_eq!(rest, "2a: | ---- ---- | ---- ---1 |");
}

#[test]
fn diff_mode_mixed_traffic() {
    let config = MonitorConfig::new().with_diff_mode(true);
    let input = b"sniffer ready\n\
        10 00 00 00 ff\n\
        20 ff 00\n\
        10 00 00 00 fe\n\
        10 0f 00 00 fe\n\
        20 ff 00 ERR\n\
        20 7f 00\n\
        10 0f 00 00 fe\n";
    let output = run(&config, input);

    let rendered: Vec<&str> = output.iter().map(|l| split_timestamp(l).1).collect();
    assert_eq!(
        rendered,
        vec![
            "10: | ---- 1111 | ---- ---- | ---- ---- |",
            "20: | 0--- ---- |",
        ]
    );
}

#[test]
fn diff_mode_ignores_crlf_lines_unless_stripped() {
    let input = b"2a 01 ff\r\n2a 02 ff\r\n";

    let config = MonitorConfig::new().with_diff_mode(true);
    assert!(run(&config, input).is_empty());

    let config = config.with_strip_cr(true);
    let output = run(&config, input);
    assert_eq!(output.len(), 1);
    assert_eq!(split_timestamp(&output[0]).1, "2a: | ---- --10 |");
}

#[test]
fn raw_mode_emits_every_line_in_order() {
    let config = MonitorConfig::new();
    let input = b"2a 01 02 ff\n2a 01 02 ff\nnot a frame\n\n2A 01 02 FF ERR\n";
    let output = run(&config, input);

    let rendered: Vec<&str> = output.iter().map(|l| split_timestamp(l).1).collect();
    assert_eq!(
        rendered,
        vec!["2a 01 02 ff", "2a 01 02 ff", "not a frame", "", "2A 01 02 FF ERR"]
    );

    let stamps: Vec<u64> = output.iter().map(|l| split_timestamp(l).0).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn diff_mode_frame_length_change_shows_all_bits() {
    let config = MonitorConfig::new().with_diff_mode(true);
    let output = run(&config, b"30 01 ff\n30 01 02 ff\n30 01 02 ff\n");

    assert_eq!(output.len(), 1);
    assert_eq!(split_timestamp(&output[0]).1, "30: | 0000 0001 | 0000 0010 |");
}
