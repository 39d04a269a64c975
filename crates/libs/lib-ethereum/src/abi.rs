//! # Contract Interfaces
//!
//! ABI definitions for the three pre-deployed contract surfaces this
//! front-end consumes: the collection factory, the per-collection NFT
//! contract and the marketplace. The `sol!` macro generates typed calldata
//! builders, return decoders and the `NFTListed` event decoder.

use alloy_sol_types::sol;
use shared::dto::{CollectionInfo, TokenRecord};

sol! {
    /// Record stored by the factory for every deployed collection.
    struct CollectionData {
        string name;
        string symbol;
        address collectionAddress;
        address owner;
        uint256 createdAt;
    }

    /// Row returned by a collection's `getAllNFTs` accessor. The owner
    /// field is recorded at mint time and may be stale.
    struct MintedNft {
        uint256 tokenId;
        address owner;
        string tokenURI;
    }

    interface INFTCollectionFactory {
        function createCollection(string name, string symbol);
        function getCollectionsByOwner(address owner) external view returns (CollectionData[] memory);
        function getAllCollections() external view returns (CollectionData[] memory);
    }

    interface INFTCollection {
        function mint(address to, string ipfsHash) returns (uint256);
        function getAllNFTs() external view returns (MintedNft[] memory);
        function ownerOf(uint256 tokenId) external view returns (address);
        function approve(address to, uint256 tokenId);
        function tokenURI(uint256 tokenId) external view returns (string);
    }

    interface INFTMarketplace {
        function listNFT(address nftContract, uint256 tokenId, uint256 price);
        function buyNFT(address nftContract, uint256 tokenId) payable;

        event NFTListed(
            address indexed nftContract,
            uint256 indexed tokenId,
            uint256 price,
            address seller
        );
    }
}

impl From<CollectionData> for CollectionInfo {
    fn from(data: CollectionData) -> Self {
        CollectionInfo {
            name: data.name,
            symbol: data.symbol,
            collection_address: data.collectionAddress,
            owner: data.owner,
            created_at: data.createdAt,
        }
    }
}

impl From<CollectionInfo> for CollectionData {
    fn from(info: CollectionInfo) -> Self {
        CollectionData {
            name: info.name,
            symbol: info.symbol,
            collectionAddress: info.collection_address,
            owner: info.owner,
            createdAt: info.created_at,
        }
    }
}

impl From<MintedNft> for TokenRecord {
    fn from(nft: MintedNft) -> Self {
        TokenRecord {
            token_id: nft.tokenId,
            owner: nft.owner,
            token_uri: nft.tokenURI,
        }
    }
}

impl From<TokenRecord> for MintedNft {
    fn from(record: TokenRecord) -> Self {
        MintedNft {
            tokenId: record.token_id,
            owner: record.owner,
            tokenURI: record.token_uri,
        }
    }
}
