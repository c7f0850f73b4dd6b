use galinav::prelude::{Decoder, NavFrame, Signal};

mod toolkit;
use toolkit::{full_word_set, nav_sig_frame, ubx_frame, PageBuilder};

fn drain<R: std::io::Read>(decoder: &mut Decoder<R>) -> Vec<NavFrame> {
    let mut frames = Vec::new();
    loop {
        match decoder.next() {
            Some(Ok(frame)) => frames.push(frame),
            Some(Err(e)) => panic!("i/o error: {}", e),
            None => return frames,
        }
    }
}

#[test]
fn sync_and_nav_sig() {
    // garbage prefix, then a valid NAV-SIG frame
    let mut stream = vec![0xff, 0xff];
    stream.extend(nav_sig_frame(&[(2, 11), (0, 3), (2, 14)]));

    let mut decoder = Decoder::new(stream.as_slice());
    assert!(drain(&mut decoder).is_empty());

    let counters = decoder.counters();
    assert_eq!(counters.frames, 1);
    assert_eq!(counters.nav_sig, 1);
    assert_eq!(counters.nav_sig_gnss.galileo, 2);
    assert_eq!(counters.nav_sig_gnss.gps, 1);
    assert_eq!(counters.bad_checksum, 0);
}

#[test]
fn checksum_failure_is_counted() {
    let mut stream = nav_sig_frame(&[(2, 11)]);
    let last = stream.len() - 1;
    stream[last] = stream[last].wrapping_add(1);

    let mut decoder = Decoder::new(stream.as_slice());
    assert!(drain(&mut decoder).is_empty());

    let counters = decoder.counters();
    assert_eq!(counters.frames, 0);
    assert_eq!(counters.bad_checksum, 1);
}

#[test]
fn non_galileo_sfrbx_is_skipped() {
    // valid SFRBX from a GPS satellite: counted, not decoded
    let mut builder = PageBuilder::new(1);
    builder.push(64, 10).push(100, 14);
    let stream = builder.to_frame(0, 3, 0, 0);

    let mut decoder = Decoder::new(stream.as_slice());
    assert!(drain(&mut decoder).is_empty());

    let counters = decoder.counters();
    assert_eq!(counters.sfrbx, 1);
    assert_eq!(counters.sfrbx_gnss.gps, 1);
    assert_eq!(counters.sfrbx_gnss.galileo, 0);
    assert_eq!(counters.words, 0);
}

#[test]
fn alert_pages_are_dropped() {
    let mut stream = PageBuilder::new(1).to_frame(2, 11, 1, 0);
    // flip the page type bit of the first data word
    stream[6 + 8 + 3] |= 0x40;
    let (ck_a, ck_b) = galinav::prelude::Checksum::compute(&stream[2..stream.len() - 2]);
    let len = stream.len();
    stream[len - 2] = ck_a;
    stream[len - 1] = ck_b;

    let mut decoder = Decoder::new(stream.as_slice());
    assert!(drain(&mut decoder).is_empty());

    let counters = decoder.counters();
    assert_eq!(counters.sfrbx_gnss.galileo, 1);
    assert_eq!(counters.alert_pages, 1);
    assert_eq!(counters.words, 0);
}

#[test]
fn full_record_assembly() {
    let mut stream = Vec::new();
    for frame in full_word_set(11, 64, 6480, 0) {
        stream.extend(frame);
    }

    let mut decoder = Decoder::new(stream.as_slice());
    let frames = drain(&mut decoder);
    assert_eq!(frames.len(), 2, "expected header + record");

    match &frames[0] {
        NavFrame::Header(hdr) => {
            assert_eq!(hdr.iono.a.0, 45.0); // 180 * 2^-2
            assert_eq!(hdr.iono.a.1, -0.5); // -128 * 2^-8
            assert_eq!(hdr.iono.a.2, 0.0625); // 2048 * 2^-15
            assert_eq!(hdr.gst_utc.a0, 0.25); // 2^28 * 2^-30
            assert_eq!(hdr.gst_utc.t_ref, 432000);
            assert_eq!(hdr.gst_utc.week, 86);
            assert_eq!(hdr.gst_gps.a0, -(2.0_f64).powi(-24)); // -2^11 * 2^-35
            assert_eq!(hdr.gst_gps.t_ref, 7200);
            assert_eq!(hdr.gst_gps.week, 62);
        },
        other => panic!("first element must be the header, got {:?}", other),
    }

    match &frames[1] {
        NavFrame::Ephemeris(rec) => {
            assert_eq!(rec.sv.prn, 11);
            assert_eq!(rec.toe, 6480 * 60);
            assert_eq!(rec.toc, 6480 * 60);
            assert_eq!(rec.week, 1150);
            assert_eq!(rec.iodnav, 64);
            assert_eq!(rec.sisa, 107);
            // scale factor spot checks
            let pi = std::f64::consts::PI;
            assert_eq!(rec.m0, -((1_i64 << 28) as f64) * (2.0_f64).powi(-31) * pi);
            assert_eq!(rec.e, (2.0_f64).powi(-13)); // 2^20 * 2^-33
            assert_eq!(rec.delta_n, (2.0_f64).powi(-30) * pi); // 2^13 * 2^-43
            assert_eq!(rec.crs, -(2.0_f64).powi(4)); // -2^9 * 2^-5
            assert_eq!(rec.clock_drift, (2.0_f64).powi(-37)); // 2^9 * 2^-46
            assert_eq!(rec.clock_drift_rate, -(2.0_f64).powi(-56)); // -8 * 2^-59
            assert_eq!(rec.bgd_e1_e5a, -(2.0_f64).powi(-24)); // -256 * 2^-32
            assert_eq!(rec.bgd_e1_e5b, (2.0_f64).powi(-25)); // 128 * 2^-32
            assert_eq!(rec.health.bits(), 0);
        },
        other => panic!("second element must be a record, got {:?}", other),
    }

    assert_eq!(decoder.counters().words, 7);
}

#[test]
fn duplicate_ephemeris_suppressed() {
    let mut stream = Vec::new();
    // same t0e broadcast twice, then an updated one
    for frame in full_word_set(11, 64, 6480, 0) {
        stream.extend(frame);
    }
    for frame in full_word_set(11, 64, 6480, 0) {
        stream.extend(frame);
    }
    for frame in full_word_set(11, 65, 6510, 1) {
        stream.extend(frame);
    }

    let mut decoder = Decoder::new(stream.as_slice());
    let frames = drain(&mut decoder);

    // one header + two distinct records
    assert_eq!(frames.len(), 3);
    assert!(matches!(&frames[0], NavFrame::Header(_)));
    match (&frames[1], &frames[2]) {
        (NavFrame::Ephemeris(first), NavFrame::Ephemeris(second)) => {
            assert_eq!(first.toe, 6480 * 60);
            assert_eq!(second.toe, 6510 * 60);
        },
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(decoder.counters().duplicates, 1);
}

#[test]
fn records_per_satellite_are_independent() {
    // interleave two satellites, one of them incomplete
    let complete = full_word_set(5, 32, 4000, 3);
    let partial = &full_word_set(30, 33, 4000, 4)[..4]; // no word 5: no BGD/health

    let mut stream = Vec::new();
    for (done, pending) in complete.iter().zip(partial.iter()) {
        stream.extend(pending.clone());
        stream.extend(done.clone());
    }
    for frame in &complete[partial.len()..] {
        stream.extend(frame.clone());
    }

    let mut decoder = Decoder::new(stream.as_slice());
    let frames = drain(&mut decoder);

    assert_eq!(frames.len(), 2);
    match &frames[1] {
        NavFrame::Ephemeris(rec) => assert_eq!(rec.sv.prn, 5),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn truncated_stream_ends_cleanly() {
    let mut stream = Vec::new();
    for frame in full_word_set(11, 64, 6480, 0) {
        stream.extend(frame);
    }

    // cut inside the last frame: no record can complete
    let cut = stream.len() - 10;
    let mut decoder = Decoder::new(&stream[..cut]);
    assert!(drain(&mut decoder).is_empty());
    assert_eq!(decoder.counters().words, 6);
}

#[test]
fn almanacs_accessible_per_signal() {
    let mut stream = Vec::new();

    let mut w7 = PageBuilder::new(7);
    w7.push(6, 4)
        .push(2, 2)
        .push(150, 10)
        .push(19, 6) // svid
        .push_signed(-512, 13);
    stream.extend(w7.to_frame(2, 11, 5, 0));

    let mut w8 = PageBuilder::new(8);
    w8.push(6, 4)
        .push_signed(-4096, 16) // af0
        .push_signed(0, 13)
        .push(0, 4)
        .push(21, 6); // next svid
    stream.extend(w8.to_frame(2, 11, 5, 0));

    let mut decoder = Decoder::new(stream.as_slice());
    assert!(drain(&mut decoder).is_empty());

    // E5b bank of E11 holds the completed SVID1 almanac
    let almanacs: Vec<_> = decoder.almanacs(11, Signal::E5bI).collect();
    assert_eq!(almanacs.len(), 1);
    assert_eq!(almanacs[0].svid, 19);
    assert_eq!(almanacs[0].iod, 6);
    assert_eq!(almanacs[0].t0a, 90000);
    assert_eq!(almanacs[0].delta_sqrt_a, -1.0); // -512 * 2^-9
    assert_eq!(almanacs[0].af0, -(2.0_f64).powi(-7)); // -4096 * 2^-19

    // nothing on the other signal
    assert_eq!(decoder.almanacs(11, Signal::E1B).count(), 0);
}

#[test]
fn unknown_frames_are_ignored() {
    let mut stream = ubx_frame(0x05, 0x01, &[0x01, 0x02]);
    stream.extend(nav_sig_frame(&[(6, 4)]));

    let mut decoder = Decoder::new(stream.as_slice());
    assert!(drain(&mut decoder).is_empty());

    let counters = decoder.counters();
    assert_eq!(counters.frames, 2);
    assert_eq!(counters.sfrbx, 0);
    assert_eq!(counters.nav_sig, 1);
    assert_eq!(counters.nav_sig_gnss.glonass, 1);
}
