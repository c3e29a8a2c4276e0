//! Contract ABI surface consumed by the client
//!
//! Both contracts are deployed and owned externally; these bindings only
//! describe how to encode calls and decode results and logs.

use alloy_sol_types::sol;

sol! {
    /// Factory that deploys bonding-curve tokens
    #[derive(Debug, PartialEq, Eq)]
    interface IFactory {
        function launchToken(string name, string symbol) external;
        function allSubTokens(uint256 index) external view returns (address);
        function getSubTokensCount() external view returns (uint256);

        event OrgLaunched(address indexed token, address indexed creator);
    }
}

sol! {
    /// Per-token bonding curve contract
    #[derive(Debug, PartialEq, Eq)]
    interface IBondingToken {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function totalMinted() external view returns (uint256);
        function isGraduated() external view returns (bool);
        function virtualEthReserves() external view returns (uint256);
        function virtualTokenReserves() external view returns (uint256);
        function getProgress() external view returns (uint256);
        function getCurrentPrice() external view returns (uint256);
        function getBuyAmount(uint256 ethIn) external view returns (uint256);
        function getSellAmount(uint256 tokenIn) external view returns (uint256);
        function buy() external payable;
        function sell(uint256 tokenAmount) external;
        function balanceOf(address account) external view returns (uint256);

        event Bought(address indexed buyer, uint256 ethAmount, uint256 feeAmount, uint256 tokenAmount);
        event Sold(address indexed seller, uint256 tokenAmount, uint256 feeAmount, uint256 ethAmount);
    }
}
