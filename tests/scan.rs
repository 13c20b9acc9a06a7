use regex_derivative::util::scan::{find_byte, Scanner};

#[test]
fn single_one() {
    for len in 1..=500 {
        let mut buf = vec![0u8; len];
        for k in 0..len {
            buf[k] = 1;
            assert_eq!(k, find_byte(1, &buf), "len {}", len);
            buf[k] = 0;
        }
        assert_eq!(len, find_byte(1, &buf));
    }
}

#[test]
fn every_scanner() {
    let scanners =
        [Scanner::Naive, Scanner::Memchr, Scanner::Sse2, Scanner::Avx2];
    let mut buf = vec![b'-'; 129];
    for k in (0..129).rev() {
        buf[k] = b'|';
        for scanner in scanners {
            assert_eq!(k, scanner.find(b'|', &buf), "{:?}", scanner);
        }
    }
}
