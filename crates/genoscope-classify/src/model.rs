// SPDX-License-Identifier: Apache-2.0

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig, Embedding, EmbeddingConfig, LayerNorm, LayerNormConfig, Linear,
        LinearConfig,
    },
    prelude::*,
};

#[derive(Config, Debug)]
pub struct DisorderClassifierConfig {
    pub vocab_size: usize,
    pub max_seq_len: usize,
    pub d_model: usize,
    pub num_heads: usize,
    pub num_layers: usize,
    pub d_ff: usize,
    pub dropout: f64,
    pub num_labels: usize,
}

impl DisorderClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> DisorderClassifier<B> {
        let token_embedding = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let position_embedding = EmbeddingConfig::new(self.max_seq_len, self.d_model).init(device);
        let layers: Vec<EncoderBlock<B>> = (0..self.num_layers)
            .map(|_| self.build_encoder_block(device))
            .collect();
        let final_norm = LayerNormConfig::new(self.d_model).init(device);
        let class_head = LinearConfig::new(self.d_model, self.num_labels).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        DisorderClassifier {
            token_embedding,
            position_embedding,
            layers,
            final_norm,
            class_head,
            dropout,
        }
    }

    fn build_encoder_block<B: Backend>(&self, device: &B::Device) -> EncoderBlock<B> {
        let self_attn = MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
            .with_dropout(self.dropout)
            .init(device);
        let ffn_linear1 = LinearConfig::new(self.d_model, self.d_ff).init(device);
        let ffn_linear2 = LinearConfig::new(self.d_ff, self.d_model).init(device);
        let norm1 = LayerNormConfig::new(self.d_model).init(device);
        let norm2 = LayerNormConfig::new(self.d_model).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        EncoderBlock {
            self_attn,
            ffn_linear1,
            ffn_linear2,
            norm1,
            norm2,
            dropout,
        }
    }
}

#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    pub self_attn: MultiHeadAttention<B>,
    pub ffn_linear1: Linear<B>,
    pub ffn_linear2: Linear<B>,
    pub norm1: LayerNorm<B>,
    pub norm2: LayerNorm<B>,
    pub dropout: Dropout,
}

impl<B: Backend> EncoderBlock<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let attn_output = self.self_attn.forward(MhaInput::self_attn(x.clone())).context;
        let x = self.norm1.forward(x + self.dropout.forward(attn_output));
        let ffn_out = self
            .ffn_linear2
            .forward(burn::tensor::activation::gelu(
                self.ffn_linear1.forward(x.clone()),
            ));
        self.norm2.forward(x + self.dropout.forward(ffn_out))
    }
}

#[derive(Module, Debug)]
pub struct DisorderClassifier<B: Backend> {
    pub token_embedding: Embedding<B>,
    pub position_embedding: Embedding<B>,
    pub layers: Vec<EncoderBlock<B>>,
    pub final_norm: LayerNorm<B>,
    pub class_head: Linear<B>,
    pub dropout: Dropout,
}

impl<B: Backend> DisorderClassifier<B> {
    /// input_ids: [batch, seq_len] → logits: [batch, num_labels]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch_size, seq_len] = input_ids.dims();

        let tok_emb = self.token_embedding.forward(input_ids);

        // Self-attention is permutation-invariant, so position must be injected explicitly.
        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &tok_emb.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let pos_emb = self.position_embedding.forward(positions);

        let mut x = self.dropout.forward(tok_emb + pos_emb);
        for layer in &self.layers {
            x = layer.forward(x);
        }
        let x = self.final_norm.forward(x); // [batch, seq_len, d_model]

        // Pool at the first token position, then project to class logits.
        let [batch_size, _, d_model] = x.dims();
        let pooled = x
            .slice([0..batch_size, 0..1, 0..d_model])
            .reshape([batch_size, d_model]);
        self.class_head.forward(pooled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn tiny_config() -> DisorderClassifierConfig {
        DisorderClassifierConfig::new(32, 16, 8, 2, 1, 16, 0.0, 3)
    }

    #[test]
    fn forward_emits_one_logit_per_label() {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let model = tiny_config().init::<TestBackend>(&device);
        let ids: Vec<i32> = vec![1, 2, 3, 4, 0, 0, 0, 0];
        let input = Tensor::<TestBackend, 1, Int>::from_ints(ids.as_slice(), &device)
            .unsqueeze::<2>();
        let logits = model.forward(input);
        assert_eq!(logits.dims(), [1, 3]);
    }
}
