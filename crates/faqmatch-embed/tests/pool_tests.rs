use candle_core::{DType, Device, Tensor};
use faqmatch_embed::masked_mean_l2;

#[test]
fn padding_positions_do_not_move_the_mean() {
    let dev = Device::Cpu;
    // batch of two, three tokens, hidden size 2; second row has one padded slot
    let hidden = Tensor::from_slice(
        &[3.0f32, 0.0, 1.0, 0.0, 9.0, 9.0, 0.0, 2.0, 0.0, 4.0, -50.0, 50.0],
        (2, 3, 2),
        &dev,
    )
    .unwrap();
    let mask = Tensor::from_slice(&[1u32, 1, 0, 1, 1, 0], (2, 3), &dev).unwrap();

    let pooled: Vec<Vec<f32>> = masked_mean_l2(&hidden, &mask).unwrap().to_vec2().unwrap();

    // row 0: mean([3,0],[1,0]) = [2,0] -> [1,0]; row 1: mean([0,2],[0,4]) = [0,3] -> [0,1]
    let expected = [[1.0f32, 0.0], [0.0, 1.0]];
    for (row, want) in pooled.iter().zip(expected) {
        for (a, b) in row.iter().zip(want) {
            assert!((a - b).abs() < 1e-5, "got {row:?}, want {want:?}");
        }
    }
}

#[test]
fn pooled_rows_have_unit_norm() {
    let dev = Device::Cpu;
    let hidden = Tensor::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], (1, 2, 3), &dev).unwrap();
    let mask = Tensor::ones((1, 2), DType::F32, &dev).unwrap();
    let pooled: Vec<Vec<f32>> = masked_mean_l2(&hidden, &mask).unwrap().to_vec2().unwrap();
    let norm = pooled[0].iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[test]
fn rank_two_hidden_states_are_rejected() {
    let dev = Device::Cpu;
    let h = Tensor::zeros((2, 4), DType::F32, &dev).unwrap();
    let mask = Tensor::ones((2, 4), DType::F32, &dev).unwrap();
    assert!(masked_mean_l2(&h, &mask).is_err());
}
