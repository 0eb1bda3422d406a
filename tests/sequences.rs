use qmcintir::{
    faure_generating_matrices, next_prime, pascal_matrix, DigitalSequence, Error, Matrix,
};

#[test]
fn next_prime_is_the_next_prime() {
    let primes = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

    for pair in primes.windows(2) {
        assert_eq!(next_prime(pair[0]), pair[1]);
    }

    // composite arguments
    assert_eq!(next_prime(8), 11);
    assert_eq!(next_prime(32), 37);
}

#[test]
fn pascal_matrix_in_base_seven() {
    let p = pascal_matrix(7, 9).unwrap();

    assert!(p.is_lower_triangular());
    assert!((0..9).all(|i| p.get(i, i) == 1));
    assert!((0..9).all(|i| p.get(i, 0) == 1));
    // C(7, m) vanishes modulo 7 for 0 < m < 7
    assert!((1..7).all(|m| p.get(7, m) == 0));
    // C(8, 4) = 70 = 0 mod 7, C(8, 3) = 56 = 0 mod 7, C(8, 1) = 8 = 1 mod 7
    assert_eq!(p.get(8, 4), 0);
    assert_eq!(p.get(8, 3), 0);
    assert_eq!(p.get(8, 1), 1);
}

#[test]
fn generating_matrices_for_several_dimensions() {
    for s in 1..8 {
        let matrices = faure_generating_matrices(s, 6, None).unwrap();
        let base = next_prime(s as u64);

        assert_eq!(matrices.len(), s);
        assert_eq!(matrices[0], Matrix::identity(6));
        assert!(matrices
            .iter()
            .all(|m| m.size() == 6 && m.max_entry().unwrap() < base));
    }
}

#[test]
fn points_lie_in_unit_cube() {
    for &(s, digits) in &[(1, 20), (2, 10), (5, 6), (10, 4)] {
        let base = next_prime(s as u64);
        let matrices = faure_generating_matrices(s, digits, None).unwrap();
        let mut sequence = DigitalSequence::<f64>::new(base, &matrices).unwrap();

        for _ in 0..10_000 {
            let point = sequence.next_point().unwrap();
            assert_eq!(point.len(), s);
            assert!(point.iter().all(|&x| x >= 0.0 && x < 1.0));
        }
    }
}

#[test]
fn points_are_stratified() {
    // the first b^2 - 1 points of a 2-D Faure sequence in base 3 together with the origin form a
    // (0,2,2)-net: every 1/3 x 1/3 box contains exactly one point
    let matrices = faure_generating_matrices(2, 2, None).unwrap();
    let sequence = DigitalSequence::<f64>::new(3, &matrices).unwrap();
    let mut boxes = vec![vec![0; 3]; 3];
    boxes[0][0] = 1;

    for point in sequence {
        let i = (point[0] * 3.0) as usize;
        let j = (point[1] * 3.0) as usize;
        boxes[i][j] += 1;
    }

    assert!(boxes.iter().flatten().all(|&count| count == 1));
}

#[test]
fn independent_sequences_agree() {
    let matrices = faure_generating_matrices(4, 8, None).unwrap();
    let a = DigitalSequence::<f64>::new(5, &matrices).unwrap();
    let b = DigitalSequence::<f64>::new(5, &matrices).unwrap();

    for (p, q) in a.zip(b).take(5_000) {
        assert_eq!(p, q);
    }
}

#[test]
fn exhaustion() {
    let matrices = faure_generating_matrices(1, 3, None).unwrap();
    let mut sequence = DigitalSequence::<f64>::new(2, &matrices).unwrap();

    for _ in 0..7 {
        assert!(sequence.next_point().is_some());
    }

    assert!(sequence.next_point().is_none());
    assert!(sequence.next_point().is_none());
    assert_eq!(sequence.index(), 7);
}

#[test]
fn invalid_base() {
    assert_eq!(pascal_matrix(0, 3), Err(Error::InvalidBase { base: 0 }));
    assert_eq!(
        faure_generating_matrices(3, 3, Some(1)),
        Err(Error::InvalidBase { base: 1 })
    );
}
